use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

impl<T> CacheResult<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            CacheResult::Found(value) => Some(value),
            _ => None,
        }
    }
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// `ttl` 为 0 时使用后端默认过期时间
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    /// 读取并反序列化，内容损坏时顺便删除该键
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key).await.into_option()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Dropping undecodable cache entry {}: {}", key, e);
                self.remove(key).await;
                None
            }
        }
    }

    pub async fn insert_json<T: Serialize + Sync>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw, ttl).await,
            Err(e) => debug!("Skipping cache insert for {}: {}", key, e),
        }
    }
}
