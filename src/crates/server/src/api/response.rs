use actix_web::{http::StatusCode, HttpResponse, HttpResponseBuilder, ResponseError};
use application::error::AppError;
use log::error;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing authentication")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    App(#[from] AppError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::App(e) => match e {
                AppError::NotFound(_) => StatusCode::NOT_FOUND,
                AppError::Forbidden(_) => StatusCode::FORBIDDEN,
                AppError::Invariant(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                AppError::RepositoryError(_, _)
                | AppError::CacheError(_)
                | AppError::UnknownError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        let status = self.status_code();
        // 4xx 返回 fail，5xx 返回 error
        let (kind, message) = if status.is_server_error() {
            error!("Request failed: {}", self);
            ("error", "Internal server error".to_string())
        } else {
            ("fail", self.to_string())
        };
        HttpResponse::build(status).json(json!({
            "status": kind,
            "message": message,
        }))
    }
}

/// 成功响应，只带消息
pub fn message(mut builder: HttpResponseBuilder, message: &str) -> HttpResponse {
    builder.json(json!({
        "status": "success",
        "message": message,
    }))
}

/// 成功响应，携带数据
pub fn data<T: Serialize>(mut builder: HttpResponseBuilder, data: T) -> HttpResponse {
    builder.json(json!({
        "status": "success",
        "data": data,
    }))
}

/// 带消息和数据的成功响应
pub fn message_with_data<T: Serialize>(
    mut builder: HttpResponseBuilder,
    message: &str,
    data: T,
) -> HttpResponse {
    builder.json(json!({
        "status": "success",
        "message": message,
        "data": data,
    }))
}
