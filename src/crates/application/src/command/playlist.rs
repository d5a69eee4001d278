use std::sync::Arc;

use super::access::AccessResolver;
use super::activity::ActivityRecorder;
use super::shared::IdGenerator;
use crate::error::AppError;
use domain::activity::ActivityAction;
use domain::playlist::{Playlist, PlaylistRepository, PlaylistSong, PlaylistSongRepository};
use domain::song::SongRepository;
use domain::value::{PlaylistId, PlaylistSongId, SongId, UserId};
use log::info;

/// 创建播放列表命令
#[derive(Debug)]
pub struct CreatePlaylistCmd {
    pub name: String,
    pub owner_id: UserId,
}

/// 向播放列表添加或移除歌曲的命令
#[derive(Debug)]
pub struct PlaylistSongCmd {
    pub playlist_id: PlaylistId,
    pub song_id: SongId,
    pub user_id: UserId,
}

/// 播放列表应用服务
pub struct PlaylistAppService {
    playlist_repository: Arc<dyn PlaylistRepository>,
    playlist_song_repository: Arc<dyn PlaylistSongRepository>,
    song_repository: Arc<dyn SongRepository>,
    access_resolver: Arc<AccessResolver>,
    activity_recorder: Arc<ActivityRecorder>,
    id_generator: Arc<dyn IdGenerator>,
}

impl PlaylistAppService {
    pub fn new(
        playlist_repository: Arc<dyn PlaylistRepository>,
        playlist_song_repository: Arc<dyn PlaylistSongRepository>,
        song_repository: Arc<dyn SongRepository>,
        access_resolver: Arc<AccessResolver>,
        activity_recorder: Arc<ActivityRecorder>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            playlist_repository,
            playlist_song_repository,
            song_repository,
            access_resolver,
            activity_recorder,
            id_generator,
        }
    }

    /// 创建播放列表
    pub async fn create_playlist(&self, cmd: CreatePlaylistCmd) -> Result<PlaylistId, AppError> {
        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput("name is required".to_string()));
        }

        let playlist_id =
            PlaylistId::from(self.id_generator.next_prefixed_id(PlaylistId::PREFIX).await?);
        let playlist = Playlist::new(playlist_id.clone(), name, cmd.owner_id);

        if self.playlist_repository.insert(&playlist).await? == 0 {
            return Err(AppError::Invariant("Failed to add playlist".to_string()));
        }
        info!("Playlist {} created by {}", playlist.id, playlist.owner);
        Ok(playlist_id)
    }

    /// 删除播放列表，仅所有者可操作
    pub async fn delete_playlist(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<(), AppError> {
        self.access_resolver
            .verify_owner(playlist_id, user_id)
            .await?;

        if self.playlist_repository.delete(playlist_id).await? == 0 {
            return Err(AppError::NotFound(
                "Failed to delete playlist. Id not found".to_string(),
            ));
        }
        info!("Playlist {} deleted by {}", playlist_id, user_id);
        Ok(())
    }

    /// 添加歌曲，所有者或协作者可操作
    pub async fn add_song(&self, cmd: PlaylistSongCmd) -> Result<(), AppError> {
        self.access_resolver
            .verify_access(&cmd.playlist_id, &cmd.user_id)
            .await?;

        if self.song_repository.find_by_id(&cmd.song_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Song {} not found", cmd.song_id)));
        }

        let entry = PlaylistSong {
            id: PlaylistSongId::from(
                self.id_generator
                    .next_prefixed_id(PlaylistSongId::PREFIX)
                    .await?,
            ),
            playlist_id: cmd.playlist_id.clone(),
            song_id: cmd.song_id.clone(),
        };
        if self.playlist_song_repository.add_song(&entry).await? == 0 {
            return Err(AppError::Invariant("Failed to add into playlist".to_string()));
        }

        self.activity_recorder
            .record(&cmd.playlist_id, &cmd.song_id, &cmd.user_id, ActivityAction::Add)
            .await
    }

    /// 移除歌曲，所有者或协作者可操作
    pub async fn remove_song(&self, cmd: PlaylistSongCmd) -> Result<(), AppError> {
        self.access_resolver
            .verify_access(&cmd.playlist_id, &cmd.user_id)
            .await?;

        let removed = self
            .playlist_song_repository
            .remove_song(&cmd.playlist_id, &cmd.song_id)
            .await?;
        if removed == 0 {
            return Err(AppError::Invariant(
                "Failed to delete song from playlist".to_string(),
            ));
        }

        self.activity_recorder
            .record(
                &cmd.playlist_id,
                &cmd.song_id,
                &cmd.user_id,
                ActivityAction::Delete,
            )
            .await
    }
}
