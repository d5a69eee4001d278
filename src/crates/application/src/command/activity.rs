use std::sync::Arc;

use super::shared::IdGenerator;
use crate::error::AppError;
use domain::activity::{ActivityAction, ActivityLogEntry, ActivityRepository, ActivityView};
use domain::value::{ActivityId, PlaylistId, SongId, UserId};

/// 播放列表歌曲变更审计记录
///
/// 只在变更成功且访问判定通过之后调用。
pub struct ActivityRecorder {
    activity_repository: Arc<dyn ActivityRepository>,
    id_generator: Arc<dyn IdGenerator>,
}

impl ActivityRecorder {
    pub fn new(
        activity_repository: Arc<dyn ActivityRepository>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            activity_repository,
            id_generator,
        }
    }

    pub async fn append(&self, entry: &ActivityLogEntry) -> Result<(), AppError> {
        let inserted = self.activity_repository.append(entry).await?;
        if inserted == 0 {
            return Err(AppError::Invariant("Failed to add activity".to_string()));
        }
        Ok(())
    }

    /// 生成记录 ID 与时间戳后追加
    pub async fn record(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
        action: ActivityAction,
    ) -> Result<(), AppError> {
        let id = ActivityId::from(self.id_generator.next_prefixed_id(ActivityId::PREFIX).await?);
        let entry = ActivityLogEntry::new(
            id,
            playlist_id.clone(),
            song_id.clone(),
            user_id.clone(),
            action,
        );
        self.append(&entry).await
    }

    pub async fn list(&self, playlist_id: &PlaylistId) -> Result<Vec<ActivityView>, AppError> {
        Ok(self.activity_repository.find_by_playlist(playlist_id).await?)
    }
}
