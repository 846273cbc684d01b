//! Page cache trait, cached entry and error types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// A rendered response as stored in the page cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    /// `Location` header of redirects.
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub content_language: Option<String>,
    #[serde(default)]
    pub body: String,
}

/// Storage for anonymous page responses.
///
/// Keys are built by the page-cache middleware from host, path and query only.
/// Responses that depend on anything else (browser language, user) must never
/// reach [`CacheService::set_page`]; the request's kill switch guards that.
///
/// Implementations are fail-open: backend errors are logged and reported as a
/// miss, never propagated into the request.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed, shared between instances
/// - [`crate::infrastructure::cache::MemoryCache`] - Process-local
/// - [`crate::infrastructure::cache::NullCache`] - Caching disabled
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached response for `key`, `Ok(None)` on miss or error.
    async fn get_page(&self, key: &str) -> CacheResult<Option<CachedResponse>>;

    /// Stores a response; `ttl_seconds = None` uses the backend default.
    async fn set_page(
        &self,
        key: &str,
        response: &CachedResponse,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached response.
    async fn invalidate(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
