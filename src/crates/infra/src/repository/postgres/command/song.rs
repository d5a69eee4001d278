use super::db_data::song::Entity;
use async_trait::async_trait;
use domain::song::{Song, SongError, SongRepository};
use domain::value::SongId;
use sea_orm::*;

#[derive(Clone)]
pub struct SongRepositoryImpl {
    db: DbConn,
}

impl SongRepositoryImpl {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SongRepository for SongRepositoryImpl {
    async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>, SongError> {
        let result = Entity::find_by_id(id.as_str())
            .one(&self.db)
            .await
            .map_err(|e| SongError::DbErr(e.to_string()))?;
        Ok(result.map(Song::from))
    }
}
