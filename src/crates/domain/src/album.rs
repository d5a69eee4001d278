use crate::value::AlbumId;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlbumError {
    #[error("Database error: {0}")]
    DbErr(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub year: i32,
}

#[async_trait]
pub trait AlbumRepository: Send + Sync {
    async fn find_by_id(&self, id: &AlbumId) -> Result<Option<Album>, AlbumError>;

    async fn exists(&self, id: &AlbumId) -> Result<bool, AlbumError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
