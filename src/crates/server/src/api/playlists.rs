use super::response::{self, ApiError};
use crate::middleware::identity::current_user;
use crate::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Scope};
use application::command::playlist::{CreatePlaylistCmd, PlaylistSongCmd};
use domain::activity::ActivityView;
use domain::playlist::PlaylistSummary;
use domain::song::SongSummary;
use domain::value::{PlaylistId, SongId};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Deserialize, Debug)]
pub struct CreatePlaylistBody {
    pub name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSongBody {
    pub song_id: String,
}

#[derive(Serialize, Debug)]
struct PlaylistItem {
    id: String,
    name: String,
    username: String,
}

impl From<PlaylistSummary> for PlaylistItem {
    fn from(summary: PlaylistSummary) -> Self {
        Self {
            id: summary.id.into(),
            name: summary.name,
            username: summary.username,
        }
    }
}

#[derive(Serialize, Debug)]
struct SongItem {
    id: String,
    title: String,
    performer: String,
}

impl From<SongSummary> for SongItem {
    fn from(song: SongSummary) -> Self {
        Self {
            id: song.id.into(),
            title: song.title,
            performer: song.performer,
        }
    }
}

#[derive(Serialize, Debug)]
struct ActivityItem {
    username: String,
    title: String,
    action: &'static str,
    time: String,
}

impl From<ActivityView> for ActivityItem {
    fn from(view: ActivityView) -> Self {
        Self {
            username: view.username,
            title: view.title,
            action: view.action.name(),
            time: view.time.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}

/// POST /playlists
async fn create_playlist(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreatePlaylistBody>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = current_user(&req)?;
    let playlist_id = state
        .playlist_service()
        .create_playlist(CreatePlaylistCmd {
            name: body.into_inner().name,
            owner_id,
        })
        .await?;

    Ok(response::message_with_data(
        HttpResponse::Created(),
        "Playlist added successfully",
        json!({ "playlistId": playlist_id.as_str() }),
    ))
}

/// GET /playlists
async fn list_playlists(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user_id = current_user(&req)?;
    let playlists: Vec<PlaylistItem> = state
        .get_playlist()
        .list_playlists(&user_id)
        .await?
        .into_iter()
        .map(PlaylistItem::from)
        .collect();

    Ok(response::data(
        HttpResponse::Ok(),
        json!({ "playlists": playlists }),
    ))
}

/// DELETE /playlists/{id}
async fn delete_playlist(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = current_user(&req)?;
    let playlist_id = PlaylistId::from(path.into_inner());

    state
        .playlist_service()
        .delete_playlist(&playlist_id, &user_id)
        .await?;
    Ok(response::message(
        HttpResponse::Ok(),
        "Playlist deleted successfully",
    ))
}

/// POST /playlists/{id}/songs
async fn add_song(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<PlaylistSongBody>,
) -> Result<HttpResponse, ApiError> {
    let user_id = current_user(&req)?;
    state
        .playlist_service()
        .add_song(PlaylistSongCmd {
            playlist_id: PlaylistId::from(path.into_inner()),
            song_id: SongId::from(body.into_inner().song_id),
            user_id,
        })
        .await?;

    Ok(response::message(
        HttpResponse::Created(),
        "Successfully add song to playlist",
    ))
}

/// GET /playlists/{id}/songs
async fn get_playlist_songs(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = current_user(&req)?;
    let playlist_id = PlaylistId::from(path.into_inner());

    let detail = state
        .get_playlist()
        .get_playlist_songs(&playlist_id, &user_id)
        .await?;
    let songs: Vec<SongItem> = detail.songs.into_iter().map(SongItem::from).collect();
    let playlist = PlaylistItem::from(detail.summary);

    Ok(response::data(
        HttpResponse::Ok(),
        json!({
            "playlist": {
                "id": playlist.id,
                "name": playlist.name,
                "username": playlist.username,
                "songs": songs,
            }
        }),
    ))
}

/// DELETE /playlists/{id}/songs
async fn remove_song(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<PlaylistSongBody>,
) -> Result<HttpResponse, ApiError> {
    let user_id = current_user(&req)?;
    state
        .playlist_service()
        .remove_song(PlaylistSongCmd {
            playlist_id: PlaylistId::from(path.into_inner()),
            song_id: SongId::from(body.into_inner().song_id),
            user_id,
        })
        .await?;

    Ok(response::message(
        HttpResponse::Ok(),
        "Successfully delete song from playlist",
    ))
}

/// GET /playlists/{id}/activities
async fn get_activities(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user_id = current_user(&req)?;
    let playlist_id = PlaylistId::from(path.into_inner());

    let activities: Vec<ActivityItem> = state
        .get_playlist()
        .get_activities(&playlist_id, &user_id)
        .await?
        .into_iter()
        .map(ActivityItem::from)
        .collect();

    Ok(response::data(
        HttpResponse::Ok(),
        json!({
            "playlistId": playlist_id.as_str(),
            "activities": activities,
        }),
    ))
}

pub fn scope(prefix: &str) -> Scope {
    web::scope(prefix)
        .service(
            web::resource("")
                .route(web::post().to(create_playlist))
                .route(web::get().to(list_playlists)),
        )
        .service(web::resource("/{id}").route(web::delete().to(delete_playlist)))
        .service(
            web::resource("/{id}/songs")
                .route(web::post().to(add_song))
                .route(web::get().to(get_playlist_songs))
                .route(web::delete().to(remove_song)),
        )
        .service(web::resource("/{id}/activities").route(web::get().to(get_activities)))
}
