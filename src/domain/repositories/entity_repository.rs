//! Repository trait for loading content entities.

use crate::domain::entities::{ContentEntity, EntityType};
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to the CMS content store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgContentRepository`] - PostgreSQL
/// - [`crate::infrastructure::memory::MemoryContentRepository`] - seeded from site config
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// Loads an entity by type and raw id (as it appears in a path).
    ///
    /// Ids that cannot belong to an entity (e.g. `edit`) yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn load(
        &self,
        entity_type: EntityType,
        id: &str,
    ) -> Result<Option<ContentEntity>, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the backend cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
