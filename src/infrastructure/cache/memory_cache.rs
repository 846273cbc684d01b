//! Process-local page cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::service::{CacheResult, CacheService, CachedResponse};

/// Entry cap used by [`MemoryCache::new`].
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// In-memory cache with per-entry expiry and a bounded entry count.
///
/// Expired entries are dropped on lookup and swept whenever a new key would
/// exceed `max_entries`. If the map is still full after the sweep the new
/// response is not stored. Suited to single-instance deployments and tests;
/// use [`super::RedisCache`] when several instances serve the same domains.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, (Instant, CachedResponse)>>,
    default_ttl: Duration,
    max_entries: usize,
}

impl MemoryCache {
    pub fn new(default_ttl_seconds: u64) -> Self {
        Self::with_max_entries(default_ttl_seconds, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(default_ttl_seconds: u64, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl: Duration::from_secs(default_ttl_seconds),
            max_entries,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_page(&self, key: &str) -> CacheResult<Option<CachedResponse>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some((expires_at, response)) if *expires_at > Instant::now() => {
                    debug!(key, "Cache HIT");
                    return Ok(Some(response.clone()));
                }
                Some(_) => {}
                None => {
                    debug!(key, "Cache MISS");
                    return Ok(None);
                }
            }
        }

        self.entries.write().await.remove(key);
        debug!(key, "Cache entry expired");
        Ok(None)
    }

    async fn set_page(
        &self,
        key: &str,
        response: &CachedResponse,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let ttl = ttl_seconds.map_or(self.default_ttl, Duration::from_secs);
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        if !entries.contains_key(key) && entries.len() >= self.max_entries {
            let before = entries.len();
            entries.retain(|_, (expires_at, _)| *expires_at > now);
            debug!(swept = before - entries.len(), "Cache expired entries swept");

            if entries.len() >= self.max_entries {
                warn!(key, max_entries = self.max_entries, "Cache full, response not stored");
                return Ok(());
            }
        }

        entries.insert(key.to_string(), (now + ttl, response.clone()));
        debug!(key, ttl_seconds = ttl.as_secs(), "Cache SET");
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
