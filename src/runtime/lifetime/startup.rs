use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{CampusError, Result};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

const FALLBACK_CACHE: &str = "moka";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        CampusError::cache_plugin_not_found(format!("Cache backend '{name}' not found in registry"))
    })?;
    let cache = constructor().await?;
    Ok(Arc::from(cache))
}

/// 按配置创建缓存，失败时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = &AppConfig::get().cache.cache_type;
    info!("Attempting to create {} cache backend", cache_type);

    match build_cache(cache_type).await {
        Ok(cache) => Ok(cache),
        Err(e) if cache_type != FALLBACK_CACHE => {
            warn!("{}, falling back to {} cache", e, FALLBACK_CACHE);
            build_cache(FALLBACK_CACHE).await
        }
        Err(e) => Err(e),
    }
}

/// 准备服务器启动的上下文：加载数据集、创建缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
    }

    let storage = crate::storage::create_storage().await?;
    match storage.count_users().await {
        Ok(count) => warn!("Storage initialized with {} user(s)", count),
        Err(e) => debug!("Failed to count users: {}", e),
    }

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
