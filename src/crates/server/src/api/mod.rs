pub mod albums;
pub mod collaborations;
pub mod playlists;
pub mod response;

use crate::consts;
use crate::middleware::identity;
use actix_web::{middleware::from_fn, web};
use response::ApiError;

pub fn configure_service(svc: &mut web::ServiceConfig) {
    let json_cfg = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());

    svc.app_data(json_cfg)
        .service(
            albums::scope(consts::URL_PATH_ALBUMS)
                .wrap(from_fn(identity::authenticated_user)),
        )
        .service(
            playlists::scope(consts::URL_PATH_PLAYLISTS)
                .wrap(from_fn(identity::authenticated_user)),
        )
        .service(
            collaborations::scope(consts::URL_PATH_COLLABORATIONS)
                .wrap(from_fn(identity::authenticated_user)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppState, Repositories};
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use domain::album::Album;
    use domain::song::Song;
    use domain::user::User;
    use domain::value::{AlbumId, SongId, UserId};
    use infra::config::DEFAULT_IDENTITY_HEADER;
    use infra::repository::in_memory::InMemoryCatalog;
    use infra::AppConfigImpl;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn state() -> web::Data<AppState> {
        let catalog = Arc::new(InMemoryCatalog::new());
        for (id, username) in [
            ("user-A", "alice"),
            ("user-B", "bob"),
            ("user-C", "carol"),
            ("user-1", "dave"),
        ] {
            catalog.seed_user(User {
                id: UserId::from(id),
                username: username.to_string(),
                fullname: username.to_uppercase(),
            });
        }
        catalog.seed_album(Album {
            id: AlbumId::from("alb-1"),
            name: "First Light".to_string(),
            year: 2021,
        });
        catalog.seed_song(Song {
            id: SongId::from("song-1"),
            title: "Intro".to_string(),
            performer: "The Band".to_string(),
            album_id: Some(AlbumId::from("alb-1")),
        });

        let state =
            AppState::new(AppConfigImpl::default(), Repositories::in_memory(catalog)).unwrap();
        web::Data::new(state)
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(state())
                    .configure(configure_service),
            )
            .await
        };
    }

    fn as_user(req: test::TestRequest, user: &str) -> test::TestRequest {
        req.insert_header((DEFAULT_IDENTITY_HEADER, user))
    }

    #[actix_web::test]
    async fn test_album_like_flow() {
        let app = app!();

        let req = as_user(test::TestRequest::post().uri("/albums/alb-1/likes"), "user-1");
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Album liked");

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/albums/alb-1/likes").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("X-Data-Source").unwrap(), "server");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["likes"], 1);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/albums/alb-1/likes").to_request(),
        )
        .await;
        assert_eq!(resp.headers().get("X-Data-Source").unwrap(), "cache");

        let req = as_user(test::TestRequest::post().uri("/albums/alb-1/likes"), "user-1");
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "Cannot like same album twice");

        let req = as_user(test::TestRequest::delete().uri("/albums/alb-1/likes"), "user-1");
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/albums/alb-1/likes").to_request(),
        )
        .await;
        assert_eq!(resp.headers().get("X-Data-Source").unwrap(), "server");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["likes"], 0);
    }

    #[actix_web::test]
    async fn test_missing_identity_is_unauthorized() {
        let app = app!();

        let resp = test::call_service(
            &app,
            test::TestRequest::post().uri("/albums/alb-1/likes").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "fail");

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/playlists").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_unknown_album_is_not_found() {
        let app = app!();

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/albums/alb-404/likes").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_playlist_collaboration_flow() {
        let app = app!();

        let req = as_user(test::TestRequest::post().uri("/playlists"), "user-A")
            .set_json(json!({ "name": "Road Trip" }));
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let playlist_id = body["data"]["playlistId"].as_str().unwrap().to_string();
        let songs_uri = format!("/playlists/{}/songs", playlist_id);

        // 非所有者且非协作者
        let req = as_user(test::TestRequest::post().uri(&songs_uri), "user-B")
            .set_json(json!({ "songId": "song-1" }));
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = as_user(test::TestRequest::post().uri("/collaborations"), "user-A")
            .set_json(json!({ "playlistId": playlist_id, "userId": "user-B" }));
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["data"]["collaborationId"]
            .as_str()
            .unwrap()
            .starts_with("collab-"));

        // 重复添加同一协作者是客户端错误
        let req = as_user(test::TestRequest::post().uri("/collaborations"), "user-A")
            .set_json(json!({ "playlistId": playlist_id, "userId": "user-B" }));
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "Failed to add collaboration");

        let req = as_user(test::TestRequest::post().uri(&songs_uri), "user-B")
            .set_json(json!({ "songId": "song-1" }));
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = as_user(test::TestRequest::get().uri(&songs_uri), "user-C");
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = as_user(test::TestRequest::get().uri(&songs_uri), "user-B");
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["playlist"]["username"], "alice");
        assert_eq!(body["data"]["playlist"]["songs"][0]["title"], "Intro");

        let req = as_user(test::TestRequest::get().uri("/playlists"), "user-B");
        let resp = test::call_service(&app, req.to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["playlists"].as_array().unwrap().len(), 1);

        let uri = format!("/playlists/{}/activities", playlist_id);
        let req = as_user(test::TestRequest::get().uri(&uri), "user-A");
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["playlistId"], playlist_id.as_str());
        assert_eq!(body["data"]["activities"][0]["username"], "bob");
        assert_eq!(body["data"]["activities"][0]["action"], "add");

        let req = as_user(
            test::TestRequest::get().uri("/playlists/playlist-missing/songs"),
            "user-A",
        );
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let uri = format!("/playlists/{}", playlist_id);
        let req = as_user(test::TestRequest::delete().uri(&uri), "user-B");
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = as_user(test::TestRequest::delete().uri(&uri), "user-A");
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let app = app!();

        let req = as_user(test::TestRequest::post().uri("/playlists"), "user-A")
            .set_json(json!({ "title": "no name field" }));
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "fail");
    }
}
