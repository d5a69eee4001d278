use std::sync::Arc;
use std::time::Duration;

use super::shared::IdGenerator;
use crate::error::AppError;
use async_trait::async_trait;
use domain::album::AlbumRepository;
use domain::album_like::{AlbumLike, AlbumLikeError, AlbumLikeRepository};
use domain::value::{AlbumId, AlbumLikeId, UserId};
use log::{debug, info, warn};

/// 点赞数缓存键前缀
pub const LIKE_COUNT_KEY_PREFIX: &str = "user_album_likes";

/// 根据专辑 ID 生成缓存键
pub fn like_count_key(album_id: &AlbumId) -> String {
    format!("{}:{}", LIKE_COUNT_KEY_PREFIX, album_id)
}

/// 缓存查询结果，未命中不是错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(i64),
    Miss,
}

/// 点赞数缓存接口
#[async_trait]
pub trait LikeCountCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<CacheLookup, AppError>;

    async fn set(&self, key: &str, value: i64, ttl: Duration) -> Result<(), AppError>;

    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

/// 点赞结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Liked,
    /// 重复点赞，可恢复的失败，不改变任何状态
    AlreadyLiked,
}

impl LikeOutcome {
    pub fn liked(&self) -> bool {
        matches!(self, LikeOutcome::Liked)
    }

    pub fn message(&self) -> &'static str {
        match self {
            LikeOutcome::Liked => "Album liked",
            LikeOutcome::AlreadyLiked => "Cannot like same album twice",
        }
    }
}

/// 点赞数来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSource {
    Cache,
    Store,
}

impl CountSource {
    pub fn name(&self) -> &'static str {
        match self {
            CountSource::Cache => "cache",
            CountSource::Store => "store",
        }
    }

    /// `X-Data-Source` 响应头的取值
    pub fn header_value(&self) -> &'static str {
        match self {
            CountSource::Cache => "cache",
            CountSource::Store => "server",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeCount {
    pub source: CountSource,
    pub count: i64,
}

/// 专辑点赞服务
///
/// 点赞数是 `user_album_likes` 的派生值，缓存只做读加速：
/// 每次成功写入都会在返回前删除缓存键，未命中时总是从存储重新计算后再回填。
pub struct LikeCounterService {
    album_repository: Arc<dyn AlbumRepository>,
    album_like_repository: Arc<dyn AlbumLikeRepository>,
    cache: Arc<dyn LikeCountCache>,
    id_generator: Arc<dyn IdGenerator>,
    cache_ttl: Duration,
}

impl LikeCounterService {
    pub fn new(
        album_repository: Arc<dyn AlbumRepository>,
        album_like_repository: Arc<dyn AlbumLikeRepository>,
        cache: Arc<dyn LikeCountCache>,
        id_generator: Arc<dyn IdGenerator>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            album_repository,
            album_like_repository,
            cache,
            id_generator,
            cache_ttl,
        }
    }

    async fn ensure_album_exists(&self, album_id: &AlbumId) -> Result<(), AppError> {
        if !self.album_repository.exists(album_id).await? {
            return Err(AppError::NotFound(format!("Album {} not found", album_id)));
        }
        Ok(())
    }

    async fn invalidate(&self, album_id: &AlbumId) -> Result<(), AppError> {
        let key = like_count_key(album_id);
        self.cache.delete(&key).await?;
        debug!("Like count cache invalidated: {}", key);
        Ok(())
    }

    /// 重复点赞时也删除缓存键，补偿上一次写入后失败的失效
    async fn invalidate_quietly(&self, album_id: &AlbumId) {
        if let Err(e) = self.invalidate(album_id).await {
            warn!("Like count cache invalidation failed for {}: {}", album_id, e);
        }
    }

    /// 点赞专辑
    ///
    /// 已点赞时返回 `AlreadyLiked`，取消点赞请使用 [`Self::remove_like`]。
    pub async fn toggle_like(
        &self,
        album_id: &AlbumId,
        user_id: &UserId,
    ) -> Result<LikeOutcome, AppError> {
        self.ensure_album_exists(album_id).await?;

        // 快速路径，最终由存储的唯一约束保证
        if self.album_like_repository.exists(album_id, user_id).await? {
            self.invalidate_quietly(album_id).await;
            return Ok(LikeOutcome::AlreadyLiked);
        }

        let like_id =
            AlbumLikeId::from(self.id_generator.next_prefixed_id(AlbumLikeId::PREFIX).await?);
        let like = AlbumLike::new(like_id, album_id.clone(), user_id.clone());

        match self.album_like_repository.insert(&like).await {
            Ok(0) => Err(AppError::Invariant("Failed to like album".to_string())),
            Ok(_) => {
                self.invalidate(album_id).await?;
                info!("Album {} liked by {}", album_id, user_id);
                Ok(LikeOutcome::Liked)
            }
            Err(AlbumLikeError::AlreadyExists { .. }) => {
                debug!(
                    "Concurrent like rejected by store for album {} user {}",
                    album_id, user_id
                );
                self.invalidate_quietly(album_id).await;
                Ok(LikeOutcome::AlreadyLiked)
            }
            Err(AlbumLikeError::DbErr(msg)) => Err(AppError::Invariant(format!(
                "Failed to like album: {}",
                msg
            ))),
        }
    }

    /// 取消点赞
    pub async fn remove_like(&self, album_id: &AlbumId, user_id: &UserId) -> Result<(), AppError> {
        self.ensure_album_exists(album_id).await?;

        let deleted = self.album_like_repository.delete(album_id, user_id).await?;
        if deleted == 0 {
            return Err(AppError::Invariant("Failed to unlike album".to_string()));
        }

        self.invalidate(album_id).await?;
        info!("Album {} unliked by {}", album_id, user_id);
        Ok(())
    }

    /// 获取专辑点赞数，优先读缓存
    pub async fn get_count(&self, album_id: &AlbumId) -> Result<LikeCount, AppError> {
        let key = like_count_key(album_id);

        match self.cache.get(&key).await {
            Ok(CacheLookup::Hit(count)) => {
                debug!("Like count for {} served from {}", album_id, CountSource::Cache.name());
                return Ok(LikeCount {
                    source: CountSource::Cache,
                    count,
                })
            }
            Ok(CacheLookup::Miss) => {}
            Err(e) => warn!("Like count cache read failed for {}: {}", key, e),
        }

        self.ensure_album_exists(album_id).await?;
        let count = self.album_like_repository.count_by_album(album_id).await? as i64;

        if let Err(e) = self.cache.set(&key, count, self.cache_ttl).await {
            warn!("Failed to populate like count cache for {}: {}", key, e);
        }
        debug!("Like count for {} served from {}", album_id, CountSource::Store.name());

        Ok(LikeCount {
            source: CountSource::Store,
            count,
        })
    }
}
