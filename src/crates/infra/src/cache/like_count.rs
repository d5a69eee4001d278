use application::command::album_like::{CacheLookup, LikeCountCache};
use application::error::AppError;
use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};

/// 缓存条目，携带写入时指定的过期时间
#[derive(Debug, Clone, Copy)]
struct CachedCount {
    count: i64,
    ttl: Duration,
}

/// 每个条目按各自的 ttl 过期，覆盖写入时重新计时
struct PerEntryTtl;

impl Expiry<String, CachedCount> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedCount,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedCount,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// 基于 moka 的进程内点赞数缓存
#[derive(Clone)]
pub struct MokaLikeCountCache {
    inner: Cache<String, CachedCount>,
}

impl MokaLikeCountCache {
    pub fn new(max_capacity: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();
        Self { inner }
    }
}

#[async_trait]
impl LikeCountCache for MokaLikeCountCache {
    async fn get(&self, key: &str) -> Result<CacheLookup, AppError> {
        Ok(match self.inner.get(key).await {
            Some(entry) => {
                log::debug!("Like count cache hit: {}", key);
                CacheLookup::Hit(entry.count)
            }
            None => CacheLookup::Miss,
        })
    }

    async fn set(&self, key: &str, value: i64, ttl: Duration) -> Result<(), AppError> {
        if ttl.is_zero() {
            return Err(AppError::CacheError(format!(
                "refusing to cache {} without a ttl",
                key
            )));
        }
        self.inner
            .insert(key.to_string(), CachedCount { count: value, ttl })
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.inner.invalidate(key).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = MokaLikeCountCache::new(100);
        let key = "user_album_likes:album-1";

        assert_eq!(cache.get(key).await.unwrap(), CacheLookup::Miss);

        cache.set(key, 3, Duration::from_secs(60)).await.unwrap();
        assert_eq!(cache.get(key).await.unwrap(), CacheLookup::Hit(3));

        cache.delete(key).await.unwrap();
        assert_eq!(cache.get(key).await.unwrap(), CacheLookup::Miss);

        // 删除不存在的键不是错误
        cache.delete(key).await.unwrap();
    }

    #[tokio::test]
    async fn test_entry_expires_after_its_own_ttl() {
        let cache = MokaLikeCountCache::new(100);

        cache
            .set("short", 1, Duration::from_millis(50))
            .await
            .unwrap();
        cache.set("long", 2, Duration::from_secs(60)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.get("short").await.unwrap(), CacheLookup::Miss);
        assert_eq!(cache.get("long").await.unwrap(), CacheLookup::Hit(2));
    }

    #[tokio::test]
    async fn test_zero_count_is_a_hit() {
        let cache = MokaLikeCountCache::new(100);
        cache.set("zero", 0, Duration::from_secs(60)).await.unwrap();
        assert_eq!(cache.get("zero").await.unwrap(), CacheLookup::Hit(0));
    }

    #[tokio::test]
    async fn test_zero_ttl_is_rejected() {
        let cache = MokaLikeCountCache::new(100);
        assert!(matches!(
            cache.set("k", 1, Duration::ZERO).await,
            Err(AppError::CacheError(_))
        ));
        assert_eq!(cache.get("k").await.unwrap(), CacheLookup::Miss);
    }
}
