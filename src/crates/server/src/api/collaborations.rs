use super::response::{self, ApiError};
use crate::middleware::identity::current_user;
use crate::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Scope};
use application::command::collaboration::CollaborationCmd;
use domain::value::{PlaylistId, UserId};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationBody {
    pub playlist_id: String,
    pub user_id: String,
}

impl CollaborationBody {
    fn into_cmd(self, requester_id: UserId) -> CollaborationCmd {
        CollaborationCmd {
            playlist_id: PlaylistId::from(self.playlist_id),
            collaborator_id: UserId::from(self.user_id),
            requester_id,
        }
    }
}

/// POST /collaborations
async fn add_collaboration(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CollaborationBody>,
) -> Result<HttpResponse, ApiError> {
    let requester_id = current_user(&req)?;
    let collaboration_id = state
        .collaboration_service()
        .add_collaborator(body.into_inner().into_cmd(requester_id))
        .await?;

    Ok(response::message_with_data(
        HttpResponse::Created(),
        "Collaboration added successfully",
        json!({ "collaborationId": collaboration_id.as_str() }),
    ))
}

/// DELETE /collaborations
async fn delete_collaboration(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CollaborationBody>,
) -> Result<HttpResponse, ApiError> {
    let requester_id = current_user(&req)?;
    state
        .collaboration_service()
        .remove_collaborator(body.into_inner().into_cmd(requester_id))
        .await?;

    Ok(response::message(
        HttpResponse::Ok(),
        "Collaboration deleted successfully",
    ))
}

pub fn scope(prefix: &str) -> Scope {
    web::scope(prefix).service(
        web::resource("")
            .route(web::post().to(add_collaboration))
            .route(web::delete().to(delete_collaboration)),
    )
}
