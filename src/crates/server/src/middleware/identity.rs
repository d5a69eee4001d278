use crate::api::response::ApiError;
use crate::AppState;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, HttpMessage, HttpRequest,
};
use domain::value::UserId;
use log::debug;

/// 已认证用户，由上游网关通过可信请求头传入
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

/// 从可信请求头解析调用者身份
///
/// 只负责写入请求上下文，是否必须登录由处理函数通过 [`current_user`] 决定。
pub async fn authenticated_user(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Missing AppState"))?;

    let user_id = req
        .headers()
        .get(state.app_cfg.identity_header.as_str())
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(UserId::from);

    match user_id {
        Some(user_id) => {
            req.extensions_mut().insert(AuthenticatedUser(user_id));
        }
        None => debug!("{}: no identity header", req.path()),
    }
    next.call(req).await
}

/// 处理函数中取出当前用户，缺失时返回 401
pub fn current_user(req: &HttpRequest) -> Result<UserId, ApiError> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .map(|user| user.0.clone())
        .ok_or(ApiError::Unauthorized)
}
