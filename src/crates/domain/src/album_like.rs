use crate::value::{AlbumId, AlbumLikeId, UserId};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlbumLikeError {
    /// 唯一约束 `(album_id, user_id)` 冲突
    #[error("Album {album_id} is already liked by {user_id}")]
    AlreadyExists { album_id: AlbumId, user_id: UserId },
    #[error("Database error: {0}")]
    DbErr(String),
}

/// 用户对专辑的点赞关系，每个 `(album_id, user_id)` 至多一条
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumLike {
    pub id: AlbumLikeId,
    pub album_id: AlbumId,
    pub user_id: UserId,
}

impl AlbumLike {
    pub fn new(id: AlbumLikeId, album_id: AlbumId, user_id: UserId) -> Self {
        Self {
            id,
            album_id,
            user_id,
        }
    }
}

/// 点赞仓储接口
///
/// `insert` 必须依赖存储自身的唯一约束拒绝重复行，并以
/// `AlbumLikeError::AlreadyExists` 报告。
#[async_trait]
pub trait AlbumLikeRepository: Send + Sync {
    async fn exists(&self, album_id: &AlbumId, user_id: &UserId) -> Result<bool, AlbumLikeError>;

    async fn insert(&self, like: &AlbumLike) -> Result<u64, AlbumLikeError>;

    async fn delete(&self, album_id: &AlbumId, user_id: &UserId) -> Result<u64, AlbumLikeError>;

    async fn count_by_album(&self, album_id: &AlbumId) -> Result<u64, AlbumLikeError>;
}
