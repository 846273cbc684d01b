//! Editor tokens listed in the site configuration.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::repositories::TokenRepository;
use crate::domain::site::EditorConfig;
use crate::error::AppError;

/// Token repository backed by the `editors` list of the site configuration.
///
/// Usage is not tracked.
pub struct MemoryTokenRepository {
    by_hash: HashMap<String, String>,
}

impl MemoryTokenRepository {
    pub fn new(editors: &[EditorConfig]) -> Self {
        let by_hash = editors
            .iter()
            .map(|e| (e.token_hash.to_ascii_lowercase(), e.id.clone()))
            .collect();
        Self { by_hash }
    }
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn find_editor(&self, token_hash: &str) -> Result<Option<String>, AppError> {
        Ok(self.by_hash.get(token_hash).cloned())
    }

    async fn update_last_used(&self, _token_hash: &str) -> Result<(), AppError> {
        Ok(())
    }
}
