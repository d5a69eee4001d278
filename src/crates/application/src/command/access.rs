use std::sync::Arc;

use crate::error::AppError;
use domain::collaboration::CollaborationRepository;
use domain::playlist::PlaylistRepository;
use domain::value::{PlaylistId, UserId};
use log::{debug, warn};

/// 访问判定结果
///
/// `Denied` 携带第一步（所有权校验）产生的原始错误。
#[derive(Debug)]
pub enum AccessDecision {
    Granted,
    Denied(AppError),
}

/// 播放列表访问判定
///
/// 两条授权路径：所有者，或协作者。
pub struct AccessResolver {
    playlist_repository: Arc<dyn PlaylistRepository>,
    collaboration_repository: Arc<dyn CollaborationRepository>,
}

impl AccessResolver {
    pub fn new(
        playlist_repository: Arc<dyn PlaylistRepository>,
        collaboration_repository: Arc<dyn CollaborationRepository>,
    ) -> Self {
        Self {
            playlist_repository,
            collaboration_repository,
        }
    }

    /// 校验用户是否为播放列表所有者
    pub async fn verify_owner(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<(), AppError> {
        let playlist = self
            .playlist_repository
            .find_by_id(playlist_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Playlist not found".to_string()))?;

        if !playlist.is_owned_by(user_id) {
            return Err(AppError::Forbidden(
                "You are not authorized to access this resource".to_string(),
            ));
        }
        Ok(())
    }

    /// 先校验所有权，仅当播放列表存在且调用者不是所有者时才查询协作关系
    pub async fn resolve(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<AccessDecision, AppError> {
        let denied = match self.verify_owner(playlist_id, user_id).await {
            Ok(()) => return Ok(AccessDecision::Granted),
            Err(e @ AppError::Forbidden(_)) => e,
            Err(e) => return Err(e),
        };

        match self
            .collaboration_repository
            .exists(playlist_id, user_id)
            .await
        {
            Ok(true) => {
                debug!(
                    "Access to playlist {} granted to collaborator {}",
                    playlist_id, user_id
                );
                Ok(AccessDecision::Granted)
            }
            Ok(false) => Ok(AccessDecision::Denied(denied)),
            Err(e) => {
                warn!(
                    "Collaboration lookup failed for playlist {} user {}: {}",
                    playlist_id, user_id, e
                );
                Ok(AccessDecision::Denied(denied))
            }
        }
    }

    /// 所有者或协作者可访问
    ///
    /// 失败时：播放列表不存在返回 `NotFound`，否则总是返回所有权校验的 `Forbidden`。
    pub async fn verify_access(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<(), AppError> {
        match self.resolve(playlist_id, user_id).await? {
            AccessDecision::Granted => Ok(()),
            AccessDecision::Denied(reason) => Err(reason),
        }
    }
}
