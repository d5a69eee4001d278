use crate::value::{CollaborationId, PlaylistId, UserId};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollaborationError {
    /// 唯一约束 `(playlist_id, user_id)` 冲突
    #[error("User {user_id} already collaborates on playlist {playlist_id}")]
    AlreadyExists {
        playlist_id: PlaylistId,
        user_id: UserId,
    },
    #[error("Database error: {0}")]
    DbErr(String),
}

/// 协作关系：授予非所有者对播放列表的访问权限
#[derive(Debug, Clone, PartialEq)]
pub struct Collaboration {
    pub id: CollaborationId,
    pub playlist_id: PlaylistId,
    pub user_id: UserId,
}

impl Collaboration {
    pub fn new(id: CollaborationId, playlist_id: PlaylistId, user_id: UserId) -> Self {
        Self {
            id,
            playlist_id,
            user_id,
        }
    }
}

#[async_trait]
pub trait CollaborationRepository: Send + Sync {
    async fn exists(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<bool, CollaborationError>;

    async fn insert(&self, collaboration: &Collaboration) -> Result<u64, CollaborationError>;

    async fn delete(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<u64, CollaborationError>;
}
