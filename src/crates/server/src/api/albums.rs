use super::response::{self, ApiError};
use crate::consts::DATA_SOURCE_HEADER;
use crate::middleware::identity::current_user;
use crate::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Scope};
use domain::value::AlbumId;
use serde_json::json;

/// POST /albums/{id}/likes
async fn like_album(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = current_user(&req)?;
    let album_id = AlbumId::from(path.into_inner());

    let outcome = state.like_counter().toggle_like(&album_id, &user_id).await?;
    if !outcome.liked() {
        return Err(ApiError::BadRequest(outcome.message().to_string()));
    }
    Ok(response::message(HttpResponse::Created(), outcome.message()))
}

/// DELETE /albums/{id}/likes
async fn unlike_album(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = current_user(&req)?;
    let album_id = AlbumId::from(path.into_inner());

    state.like_counter().remove_like(&album_id, &user_id).await?;
    Ok(response::message(HttpResponse::Ok(), "Album unliked"))
}

/// GET /albums/{id}/likes
async fn get_album_likes(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let album_id = AlbumId::from(path.into_inner());

    let like_count = state.like_counter().get_count(&album_id).await?;
    let mut builder = HttpResponse::Ok();
    builder.insert_header((DATA_SOURCE_HEADER, like_count.source.header_value()));
    Ok(response::data(builder, json!({ "likes": like_count.count })))
}

pub fn scope(prefix: &str) -> Scope {
    web::scope(prefix).service(
        web::resource("/{id}/likes")
            .route(web::post().to(like_album))
            .route(web::delete().to(unlike_album))
            .route(web::get().to(get_album_likes)),
    )
}
