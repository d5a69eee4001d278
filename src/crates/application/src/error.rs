use domain::activity::ActivityError;
use domain::album::AlbumError;
use domain::album_like::AlbumLikeError;
use domain::collaboration::CollaborationError;
use domain::playlist::PlaylistError;
use domain::song::SongError;
use domain::user::UserError;

use thiserror::Error;

/// 应用层错误
///
/// `NotFound` / `Forbidden` / `Invariant` 是对调用方可见的业务错误，
/// 在检测点产生后原样向上传递，不做内部重试。
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Invariant(String),
    #[error("Repository error: {0}: {1}")]
    RepositoryError(String, String),
    #[error("Cache error: {0}")]
    CacheError(String),
    #[error("Unknown error: {0}")]
    UnknownError(String),
}

impl From<PlaylistError> for AppError {
    fn from(e: PlaylistError) -> Self {
        match e {
            PlaylistError::DbErr(msg) => AppError::RepositoryError("Playlist".to_string(), msg),
            PlaylistError::OtherErr(msg) => AppError::UnknownError(msg),
        }
    }
}

impl From<CollaborationError> for AppError {
    fn from(e: CollaborationError) -> Self {
        match e {
            CollaborationError::AlreadyExists { .. } => AppError::Invariant(e.to_string()),
            CollaborationError::DbErr(msg) => {
                AppError::RepositoryError("Collaboration".to_string(), msg)
            }
        }
    }
}

impl From<AlbumError> for AppError {
    fn from(e: AlbumError) -> Self {
        match e {
            AlbumError::DbErr(msg) => AppError::RepositoryError("Album".to_string(), msg),
        }
    }
}

impl From<AlbumLikeError> for AppError {
    fn from(e: AlbumLikeError) -> Self {
        match e {
            AlbumLikeError::AlreadyExists { .. } => AppError::Invariant(e.to_string()),
            AlbumLikeError::DbErr(msg) => AppError::RepositoryError("AlbumLike".to_string(), msg),
        }
    }
}

impl From<ActivityError> for AppError {
    fn from(e: ActivityError) -> Self {
        match e {
            ActivityError::UnknownAction(action) => {
                AppError::InvalidInput(format!("unknown activity action {}", action))
            }
            ActivityError::DbErr(msg) => AppError::RepositoryError("Activity".to_string(), msg),
        }
    }
}

impl From<SongError> for AppError {
    fn from(e: SongError) -> Self {
        match e {
            SongError::DbErr(msg) => AppError::RepositoryError("Song".to_string(), msg),
        }
    }
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::DbErr(msg) => AppError::RepositoryError("User".to_string(), msg),
        }
    }
}
