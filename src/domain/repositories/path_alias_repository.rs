//! Repository trait for path alias resolution.

use crate::error::AppError;
use async_trait::async_trait;

/// Maps human-readable alias paths to canonical entity paths.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PathAliasRepository: Send + Sync {
    /// Resolves `/solutions` to e.g. `/node/1`.
    ///
    /// Paths without an alias come back unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn resolve(&self, alias: &str) -> Result<String, AppError>;
}
