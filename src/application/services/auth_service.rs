//! Editor authentication by bearer token.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::TokenRepository;
use crate::domain::request_context::CurrentUser;
use crate::error::AppError;
use crate::utils::token::hash_token;

/// Resolves bearer tokens to editors.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before the
/// lookup, so a leaked token table cannot be replayed without the secret.
pub struct AuthService<R: TokenRepository + ?Sized> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// `signing_secret` must match the value used when the token hashes were issued.
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Authenticates a raw token and returns its editor.
    ///
    /// A successful lookup records token usage; failures to record are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked,
    /// [`AppError::Internal`] on storage errors.
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let Some(editor_id) = self.repository.find_editor(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        };

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::debug!(error = %e, "Failed to record token usage");
        }

        Ok(CurrentUser { id: editor_id })
    }
}
