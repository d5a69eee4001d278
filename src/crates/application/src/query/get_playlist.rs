use crate::command::access::AccessResolver;
use crate::error::AppError;
use domain::activity::{ActivityRepository, ActivityView};
use domain::playlist::{PlaylistRepository, PlaylistSongRepository, PlaylistSummary};
use domain::song::SongSummary;
use domain::value::{PlaylistId, UserId};
use std::sync::Arc;

/// 播放列表详情（包含歌曲）
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistDetail {
    pub summary: PlaylistSummary,
    pub songs: Vec<SongSummary>,
}

/// 获取播放列表查询服务
#[derive(Clone)]
pub struct GetPlaylist {
    playlist_repository: Arc<dyn PlaylistRepository>,
    playlist_song_repository: Arc<dyn PlaylistSongRepository>,
    activity_repository: Arc<dyn ActivityRepository>,
    access_resolver: Arc<AccessResolver>,
}

impl GetPlaylist {
    pub fn new(
        playlist_repository: Arc<dyn PlaylistRepository>,
        playlist_song_repository: Arc<dyn PlaylistSongRepository>,
        activity_repository: Arc<dyn ActivityRepository>,
        access_resolver: Arc<AccessResolver>,
    ) -> Self {
        Self {
            playlist_repository,
            playlist_song_repository,
            activity_repository,
            access_resolver,
        }
    }

    /// 用户拥有或参与协作的播放列表
    pub async fn list_playlists(&self, user_id: &UserId) -> Result<Vec<PlaylistSummary>, AppError> {
        Ok(self
            .playlist_repository
            .find_accessible_by_user(user_id)
            .await?)
    }

    /// 根据 ID 获取播放列表（包含歌曲详情）
    pub async fn get_playlist_songs(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<PlaylistDetail, AppError> {
        self.access_resolver
            .verify_access(playlist_id, user_id)
            .await?;

        let summary = self
            .playlist_repository
            .find_summary_by_id(playlist_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Playlist not found".to_string()))?;
        let songs = self.playlist_song_repository.find_songs(playlist_id).await?;
        Ok(PlaylistDetail { summary, songs })
    }

    pub async fn get_activities(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<Vec<ActivityView>, AppError> {
        self.access_resolver
            .verify_access(playlist_id, user_id)
            .await?;
        Ok(self.activity_repository.find_by_playlist(playlist_id).await?)
    }
}
