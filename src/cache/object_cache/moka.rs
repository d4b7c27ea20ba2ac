use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::{Expiry, future::Cache};
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaObjectCache);

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// 按条目 TTL 过期
struct EntryExpiry;

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

pub struct MokaObjectCache {
    inner: Cache<String, Entry>,
    default_ttl: Duration,
}

impl MokaObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        if config.cache.default_ttl == 0 {
            return Err("cache.default_ttl must be greater than 0".to_string());
        }
        Ok(Self::with_settings(
            config.cache.memory.max_capacity,
            config.cache.default_ttl,
        ))
    }

    pub fn with_settings(max_capacity: u64, default_ttl_secs: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .build();

        debug!(
            "Moka object cache initialized (capacity: {}, default ttl: {}s)",
            max_capacity, default_ttl_secs
        );
        Self {
            inner,
            default_ttl: Duration::from_secs(default_ttl_secs),
        }
    }
}

#[async_trait]
impl ObjectCache for MokaObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(entry) => CacheResult::Found(entry.value),
            None => {
                debug!("Cache miss: {}", key);
                CacheResult::NotFound
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = if ttl == 0 {
            self.default_ttl
        } else {
            Duration::from_secs(ttl)
        };
        self.inner.insert(key, Entry { value, ttl }).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaObjectCache::with_settings(100, 60);
        cache.insert_raw("user:1".into(), "{}".into(), 0).await;
        assert_eq!(cache.get_raw("user:1").await, CacheResult::Found("{}".to_string()));

        cache.remove("user:1").await;
        assert_eq!(cache.get_raw("user:1").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_per_entry_ttl_expires() {
        let cache = MokaObjectCache::with_settings(100, 60);
        cache.insert_raw("short".into(), "v".into(), 1).await;
        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert_eq!(cache.get_raw("short").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_typed_helpers() {
        let cache: Box<dyn ObjectCache> = Box::new(MokaObjectCache::with_settings(10, 60));
        cache.insert_json("nums".into(), &vec![1, 2, 3], 0).await;
        assert_eq!(cache.get_json::<Vec<i32>>("nums").await, Some(vec![1, 2, 3]));

        cache.insert_raw("bad".into(), "not json".into(), 0).await;
        assert_eq!(cache.get_json::<Vec<i32>>("bad").await, None);
        assert_eq!(cache.get_raw("bad").await, CacheResult::NotFound);
    }
}
