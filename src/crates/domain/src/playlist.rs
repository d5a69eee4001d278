use crate::song::SongSummary;
use crate::value::{PlaylistId, PlaylistSongId, SongId, UserId};
use async_trait::async_trait;
use thiserror::Error;

/// 播放列表领域错误
#[derive(Error, Debug)]
pub enum PlaylistError {
    #[error("Database error: {0}")]
    DbErr(String),
    #[error("{0}")]
    OtherErr(String),
}

/// 播放列表聚合根
///
/// 所有者在创建后不可变，访问判定完全依赖 `owner` 字段。
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub owner: UserId,
}

impl Playlist {
    /// 创建新播放列表
    pub fn new(id: PlaylistId, name: &str, owner: UserId) -> Self {
        Self {
            id,
            name: name.to_string(),
            owner,
        }
    }

    /// 是否由指定用户拥有
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner == user_id
    }
}

/// 播放列表列表项（带所有者用户名）
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistSummary {
    pub id: PlaylistId,
    pub name: String,
    pub username: String,
}

/// 播放列表中的歌曲关联
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistSong {
    pub id: PlaylistSongId,
    pub playlist_id: PlaylistId,
    pub song_id: SongId,
}

/// 播放列表仓储接口
///
/// 写操作返回受影响的行数，由调用方决定零行时的语义。
#[async_trait]
pub trait PlaylistRepository: Send + Sync {
    async fn find_by_id(&self, id: &PlaylistId) -> Result<Option<Playlist>, PlaylistError>;

    async fn insert(&self, playlist: &Playlist) -> Result<u64, PlaylistError>;

    async fn delete(&self, id: &PlaylistId) -> Result<u64, PlaylistError>;

    /// 用户拥有或参与协作的播放列表
    async fn find_accessible_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PlaylistSummary>, PlaylistError>;

    async fn find_summary_by_id(
        &self,
        id: &PlaylistId,
    ) -> Result<Option<PlaylistSummary>, PlaylistError>;
}

/// 播放列表歌曲仓储接口
#[async_trait]
pub trait PlaylistSongRepository: Send + Sync {
    async fn add_song(&self, entry: &PlaylistSong) -> Result<u64, PlaylistError>;

    async fn remove_song(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<u64, PlaylistError>;

    async fn find_songs(&self, playlist_id: &PlaylistId)
        -> Result<Vec<SongSummary>, PlaylistError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership_is_exact_match() {
        let playlist = Playlist::new(
            PlaylistId::from("pl-1"),
            "Road trip",
            UserId::from("user-A"),
        );
        assert!(playlist.is_owned_by(&UserId::from("user-A")));
        assert!(!playlist.is_owned_by(&UserId::from("user-a")));
        assert!(!playlist.is_owned_by(&UserId::from("user-B")));
    }
}
