use super::db_data::collaboration::{ActiveModel, Column, Entity};
use async_trait::async_trait;
use domain::collaboration::{Collaboration, CollaborationError, CollaborationRepository};
use domain::value::{PlaylistId, UserId};
use sea_orm::*;

#[derive(Clone)]
pub struct CollaborationRepositoryImpl {
    db: DbConn,
}

impl CollaborationRepositoryImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CollaborationRepository for CollaborationRepositoryImpl {
    async fn exists(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<bool, CollaborationError> {
        let count = Entity::find()
            .filter(Column::PlaylistId.eq(playlist_id.as_str()))
            .filter(Column::UserId.eq(user_id.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| CollaborationError::DbErr(e.to_string()))?;
        Ok(count > 0)
    }

    async fn insert(&self, collaboration: &Collaboration) -> Result<u64, CollaborationError> {
        let active_model: ActiveModel = collaboration.into();
        Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => CollaborationError::AlreadyExists {
                    playlist_id: collaboration.playlist_id.clone(),
                    user_id: collaboration.user_id.clone(),
                },
                _ => CollaborationError::DbErr(e.to_string()),
            })
    }

    async fn delete(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<u64, CollaborationError> {
        let result = Entity::delete_many()
            .filter(Column::PlaylistId.eq(playlist_id.as_str()))
            .filter(Column::UserId.eq(user_id.as_str()))
            .exec(&self.db)
            .await
            .map_err(|e| CollaborationError::DbErr(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
