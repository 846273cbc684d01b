//! Redis-backed page cache.

use super::service::{CacheError, CacheResult, CacheService, CachedResponse};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis page cache shared by every instance serving the site.
///
/// Entries are JSON-encoded [`CachedResponse`] values under the `page:` prefix.
/// All operations are fail-open: errors are logged but don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// `default_ttl_seconds` applies when [`CacheService::set_page`] gets no TTL;
    /// it comes from `CACHE_TTL_SECONDS`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "page:".to_string(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_page(&self, key: &str) -> CacheResult<Option<CachedResponse>> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&redis_key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(response) => {
                    debug!(key, "Cache HIT");
                    Ok(Some(response))
                }
                Err(e) => {
                    warn!(key, error = %e, "Discarding undecodable cache entry");
                    Ok(None)
                }
            },
            Ok(None) => {
                debug!(key, "Cache MISS");
                Ok(None)
            }
            Err(e) => {
                error!(key, error = %e, "Redis GET error");
                Ok(None)
            }
        }
    }

    async fn set_page(
        &self,
        key: &str,
        response: &CachedResponse,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();
        let ttl_seconds = ttl_seconds.unwrap_or(self.default_ttl);

        let payload = serde_json::to_string(response)
            .map_err(|e| CacheError::OperationError(e.to_string()))?;

        match conn
            .set_ex::<_, _, ()>(&redis_key, payload, ttl_seconds)
            .await
        {
            Ok(_) => {
                debug!(key, ttl_seconds, "Cache SET");
                Ok(())
            }
            Err(e) => {
                warn!(key, error = %e, "Redis SET error");
                Ok(())
            }
        }
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(&redis_key).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!(key, "Cache INVALIDATE");
                }
                Ok(())
            }
            Err(e) => {
                warn!(key, error = %e, "Redis DEL error");
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
