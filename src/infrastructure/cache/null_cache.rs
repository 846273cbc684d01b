//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, CacheService, CachedResponse};
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when `PAGE_CACHE=off` and as the fallback when Redis cannot be
/// reached at startup. Every lookup is a miss.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_page(&self, _key: &str) -> CacheResult<Option<CachedResponse>> {
        Ok(None)
    }

    async fn set_page(
        &self,
        _key: &str,
        _response: &CachedResponse,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _key: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
