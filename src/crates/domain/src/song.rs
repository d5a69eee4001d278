use crate::value::{AlbumId, SongId};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongError {
    #[error("Database error: {0}")]
    DbErr(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub performer: String,
    pub album_id: Option<AlbumId>,
}

/// 歌曲在列表中的精简视图
#[derive(Debug, Clone, PartialEq)]
pub struct SongSummary {
    pub id: SongId,
    pub title: String,
    pub performer: String,
}

impl From<Song> for SongSummary {
    fn from(song: Song) -> Self {
        Self {
            id: song.id,
            title: song.title,
            performer: song.performer,
        }
    }
}

#[async_trait]
pub trait SongRepository: Send + Sync {
    async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>, SongError>;
}
