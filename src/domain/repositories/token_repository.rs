//! Repository trait for editor API tokens.

use crate::error::AppError;
use async_trait::async_trait;

/// Lookup of editor tokens by their HMAC hash.
///
/// Raw tokens never reach the repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Returns the editor id owning a non-revoked token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_editor(&self, token_hash: &str) -> Result<Option<String>, AppError>;

    /// Records token usage. Failures are not fatal to authentication.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;
}
