pub mod api;
pub mod consts;
pub mod middleware;

use application::command::access::AccessResolver;
use application::command::activity::ActivityRecorder;
use application::command::album_like::{LikeCountCache, LikeCounterService};
use application::command::collaboration::CollaborationAppService;
use application::command::playlist::PlaylistAppService;
use application::command::shared::IdGenerator;
use application::query::get_playlist::GetPlaylist;
use domain::activity::ActivityRepository;
use domain::album::AlbumRepository;
use domain::album_like::AlbumLikeRepository;
use domain::collaboration::CollaborationRepository;
use domain::playlist::{PlaylistRepository, PlaylistSongRepository};
use domain::song::SongRepository;
use domain::user::UserRepository;
use infra::config::AppConfigImpl;
use infra::id_generator::SnowflakeIdGenerator;
use infra::repository::in_memory::InMemoryCatalog;
use infra::repository::postgres::command::{
    ActivityRepositoryImpl, AlbumLikeRepositoryImpl, AlbumRepositoryImpl,
    CollaborationRepositoryImpl, PlaylistRepositoryImpl, PlaylistSongRepositoryImpl,
    SongRepositoryImpl, UserRepositoryImpl,
};
use infra::MokaLikeCountCache;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Statement};
use std::sync::Arc;

/// 仓储集合，由组合根一次性装配
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub albums: Arc<dyn AlbumRepository>,
    pub songs: Arc<dyn SongRepository>,
    pub playlists: Arc<dyn PlaylistRepository>,
    pub playlist_songs: Arc<dyn PlaylistSongRepository>,
    pub collaborations: Arc<dyn CollaborationRepository>,
    pub album_likes: Arc<dyn AlbumLikeRepository>,
    pub activities: Arc<dyn ActivityRepository>,
}

impl Repositories {
    pub fn postgres(db: &DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserRepositoryImpl::new(db.clone())),
            albums: Arc::new(AlbumRepositoryImpl::new(db.clone())),
            songs: Arc::new(SongRepositoryImpl::new(db.clone())),
            playlists: Arc::new(PlaylistRepositoryImpl::new(db.clone())),
            playlist_songs: Arc::new(PlaylistSongRepositoryImpl::new(db.clone())),
            collaborations: Arc::new(CollaborationRepositoryImpl::new(db.clone())),
            album_likes: Arc::new(AlbumLikeRepositoryImpl::new(db.clone())),
            activities: Arc::new(ActivityRepositoryImpl::new(db.clone())),
        }
    }

    pub fn in_memory(catalog: Arc<InMemoryCatalog>) -> Self {
        Self {
            users: catalog.clone(),
            albums: catalog.clone(),
            songs: catalog.clone(),
            playlists: catalog.clone(),
            playlist_songs: catalog.clone(),
            collaborations: catalog.clone(),
            album_likes: catalog.clone(),
            activities: catalog,
        }
    }
}

pub struct AppState {
    pub app_cfg: AppConfigImpl,
    pub repositories: Repositories,
    pub like_count_cache: Arc<dyn LikeCountCache>,
    pub id_generator: Arc<dyn IdGenerator>,
}

impl AppState {
    pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
        use log::info;
        use std::time::Duration;

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(90)
            .min_connections(20)
            .connect_timeout(Duration::from_secs(3))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(60))
            .max_lifetime(Duration::from_secs(300))
            .sqlx_logging(false)
            .sqlx_logging_level(log::LevelFilter::Info);

        let db = Database::connect(opt).await?;

        let backend = DbBackend::Postgres;
        db.execute(Statement::from_string(backend, "SELECT 1".to_owned()))
            .await?;

        info!("Database connection pool initialized successfully");
        Ok(db)
    }

    pub fn new(app_cfg: AppConfigImpl, repositories: Repositories) -> Result<Self, application::error::AppError> {
        let id_generator: Arc<dyn IdGenerator> =
            Arc::new(SnowflakeIdGenerator::new(app_cfg.node_id)?);
        let like_count_cache: Arc<dyn LikeCountCache> = Arc::new(MokaLikeCountCache::new(
            app_cfg.like_count_cache().max_capacity,
        ));

        Ok(Self {
            app_cfg,
            repositories,
            like_count_cache,
            id_generator,
        })
    }

    pub fn access_resolver(&self) -> Arc<AccessResolver> {
        Arc::new(AccessResolver::new(
            self.repositories.playlists.clone(),
            self.repositories.collaborations.clone(),
        ))
    }

    pub fn like_counter(&self) -> LikeCounterService {
        LikeCounterService::new(
            self.repositories.albums.clone(),
            self.repositories.album_likes.clone(),
            self.like_count_cache.clone(),
            self.id_generator.clone(),
            self.app_cfg.like_count_cache().ttl(),
        )
    }

    pub fn playlist_service(&self) -> PlaylistAppService {
        let recorder = Arc::new(ActivityRecorder::new(
            self.repositories.activities.clone(),
            self.id_generator.clone(),
        ));
        PlaylistAppService::new(
            self.repositories.playlists.clone(),
            self.repositories.playlist_songs.clone(),
            self.repositories.songs.clone(),
            self.access_resolver(),
            recorder,
            self.id_generator.clone(),
        )
    }

    pub fn collaboration_service(&self) -> CollaborationAppService {
        CollaborationAppService::new(
            self.repositories.collaborations.clone(),
            self.repositories.users.clone(),
            self.access_resolver(),
            self.id_generator.clone(),
        )
    }

    pub fn get_playlist(&self) -> GetPlaylist {
        GetPlaylist::new(
            self.repositories.playlists.clone(),
            self.repositories.playlist_songs.clone(),
            self.repositories.activities.clone(),
            self.access_resolver(),
        )
    }
}
