use crate::value::{ActivityId, PlaylistId, SongId, UserId};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Database error: {0}")]
    DbErr(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityAction {
    Add,
    Delete,
}

impl ActivityAction {
    pub fn name(&self) -> &'static str {
        match self {
            ActivityAction::Add => "add",
            ActivityAction::Delete => "delete",
        }
    }
}

impl FromStr for ActivityAction {
    type Err = ActivityError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(ActivityAction::Add),
            "delete" => Ok(ActivityAction::Delete),
            _ => Err(ActivityError::UnknownAction(s.to_string())),
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 播放列表歌曲变更记录，只追加，不修改不删除
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLogEntry {
    pub id: ActivityId,
    pub playlist_id: PlaylistId,
    pub song_id: SongId,
    pub user_id: UserId,
    pub action: ActivityAction,
    pub time: NaiveDateTime,
}

impl ActivityLogEntry {
    pub fn new(
        id: ActivityId,
        playlist_id: PlaylistId,
        song_id: SongId,
        user_id: UserId,
        action: ActivityAction,
    ) -> Self {
        Self {
            id,
            playlist_id,
            song_id,
            user_id,
            action,
            time: Utc::now().naive_utc(),
        }
    }
}

/// 活动记录的展示视图（关联用户名与歌曲标题）
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityView {
    pub username: String,
    pub title: String,
    pub action: ActivityAction,
    pub time: NaiveDateTime,
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn append(&self, entry: &ActivityLogEntry) -> Result<u64, ActivityError>;

    /// 按时间升序返回
    async fn find_by_playlist(
        &self,
        playlist_id: &PlaylistId,
    ) -> Result<Vec<ActivityView>, ActivityError>;
}
