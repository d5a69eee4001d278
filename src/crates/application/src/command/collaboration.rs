use std::sync::Arc;

use super::access::AccessResolver;
use super::shared::IdGenerator;
use crate::error::AppError;
use domain::collaboration::{Collaboration, CollaborationError, CollaborationRepository};
use domain::user::UserRepository;
use domain::value::{CollaborationId, PlaylistId, UserId};
use log::info;

#[derive(Debug)]
pub struct CollaborationCmd {
    pub playlist_id: PlaylistId,
    pub collaborator_id: UserId,
    /// 发起请求的用户，必须是播放列表所有者
    pub requester_id: UserId,
}

pub struct CollaborationAppService {
    collaboration_repository: Arc<dyn CollaborationRepository>,
    user_repository: Arc<dyn UserRepository>,
    access_resolver: Arc<AccessResolver>,
    id_generator: Arc<dyn IdGenerator>,
}

impl CollaborationAppService {
    pub fn new(
        collaboration_repository: Arc<dyn CollaborationRepository>,
        user_repository: Arc<dyn UserRepository>,
        access_resolver: Arc<AccessResolver>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            collaboration_repository,
            user_repository,
            access_resolver,
            id_generator,
        }
    }

    pub async fn add_collaborator(&self, cmd: CollaborationCmd) -> Result<CollaborationId, AppError> {
        self.access_resolver
            .verify_owner(&cmd.playlist_id, &cmd.requester_id)
            .await?;

        if self
            .user_repository
            .find_by_id(&cmd.collaborator_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "User {} not found",
                cmd.collaborator_id
            )));
        }

        let id = CollaborationId::from(
            self.id_generator
                .next_prefixed_id(CollaborationId::PREFIX)
                .await?,
        );
        let collaboration = Collaboration::new(id.clone(), cmd.playlist_id, cmd.collaborator_id);
        match self.collaboration_repository.insert(&collaboration).await {
            Ok(0) | Err(CollaborationError::AlreadyExists { .. }) => {
                return Err(AppError::Invariant(
                    "Failed to add collaboration".to_string(),
                ));
            }
            Ok(_) => {}
            Err(e) => return Err(e.into()),
        }
        info!(
            "User {} added as collaborator of playlist {}",
            collaboration.user_id, collaboration.playlist_id
        );
        Ok(id)
    }

    pub async fn remove_collaborator(&self, cmd: CollaborationCmd) -> Result<(), AppError> {
        self.access_resolver
            .verify_owner(&cmd.playlist_id, &cmd.requester_id)
            .await?;

        let deleted = self
            .collaboration_repository
            .delete(&cmd.playlist_id, &cmd.collaborator_id)
            .await?;
        if deleted == 0 {
            return Err(AppError::Invariant(
                "Failed to delete collaboration".to_string(),
            ));
        }
        Ok(())
    }
}
