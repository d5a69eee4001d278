use super::db_data::album::Entity;
use async_trait::async_trait;
use domain::album::{Album, AlbumError, AlbumRepository};
use domain::value::AlbumId;
use sea_orm::*;

#[derive(Clone)]
pub struct AlbumRepositoryImpl {
    db: DbConn,
}

impl AlbumRepositoryImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AlbumRepository for AlbumRepositoryImpl {
    async fn find_by_id(&self, id: &AlbumId) -> Result<Option<Album>, AlbumError> {
        let result = Entity::find_by_id(id.as_str())
            .one(&self.db)
            .await
            .map_err(|e| AlbumError::DbErr(e.to_string()))?;
        Ok(result.map(Album::from))
    }
}
