use super::db_data::album_like::{ActiveModel, Column, Entity};
use async_trait::async_trait;
use domain::album_like::{AlbumLike, AlbumLikeError, AlbumLikeRepository};
use domain::value::{AlbumId, UserId};
use sea_orm::*;

#[derive(Clone)]
pub struct AlbumLikeRepositoryImpl {
    db: DbConn,
}

impl AlbumLikeRepositoryImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AlbumLikeRepository for AlbumLikeRepositoryImpl {
    async fn exists(&self, album_id: &AlbumId, user_id: &UserId) -> Result<bool, AlbumLikeError> {
        let count = Entity::find()
            .filter(Column::AlbumId.eq(album_id.as_str()))
            .filter(Column::UserId.eq(user_id.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| AlbumLikeError::DbErr(e.to_string()))?;
        Ok(count > 0)
    }

    async fn insert(&self, like: &AlbumLike) -> Result<u64, AlbumLikeError> {
        let active_model: ActiveModel = like.into();
        Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                // 并发重复点赞由唯一索引拦截
                Some(SqlErr::UniqueConstraintViolation(_)) => AlbumLikeError::AlreadyExists {
                    album_id: like.album_id.clone(),
                    user_id: like.user_id.clone(),
                },
                _ => AlbumLikeError::DbErr(e.to_string()),
            })
    }

    async fn delete(&self, album_id: &AlbumId, user_id: &UserId) -> Result<u64, AlbumLikeError> {
        let result = Entity::delete_many()
            .filter(Column::AlbumId.eq(album_id.as_str()))
            .filter(Column::UserId.eq(user_id.as_str()))
            .exec(&self.db)
            .await
            .map_err(|e| AlbumLikeError::DbErr(e.to_string()))?;
        Ok(result.rows_affected)
    }

    async fn count_by_album(&self, album_id: &AlbumId) -> Result<u64, AlbumLikeError> {
        Entity::find()
            .filter(Column::AlbumId.eq(album_id.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| AlbumLikeError::DbErr(e.to_string()))
    }
}
