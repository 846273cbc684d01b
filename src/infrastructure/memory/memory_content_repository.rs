//! In-memory content store seeded from the site configuration.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;

use crate::domain::entities::{ContentEntity, EntityType};
use crate::domain::repositories::{EntityRepository, PathAliasRepository};
use crate::domain::site::SeedContent;
use crate::error::AppError;

/// Content repository used when no database is configured.
///
/// The data is fixed at construction; lookups never fail.
pub struct MemoryContentRepository {
    entities: HashMap<(EntityType, String), ContentEntity>,
    aliases: BTreeMap<String, String>,
}

impl MemoryContentRepository {
    pub fn new(seed: &SeedContent) -> Self {
        let entities = seed
            .entities
            .iter()
            .map(|e| ((e.entity_type, e.id.clone()), e.clone()))
            .collect();

        Self {
            entities,
            aliases: seed.aliases.clone(),
        }
    }
}

#[async_trait]
impl EntityRepository for MemoryContentRepository {
    async fn load(
        &self,
        entity_type: EntityType,
        id: &str,
    ) -> Result<Option<ContentEntity>, AppError> {
        Ok(self.entities.get(&(entity_type, id.to_string())).cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl PathAliasRepository for MemoryContentRepository {
    async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        Ok(self
            .aliases
            .get(alias)
            .cloned()
            .unwrap_or_else(|| alias.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::site::SiteConfig;

    fn repository() -> MemoryContentRepository {
        MemoryContentRepository::new(&SiteConfig::bundled().unwrap().content)
    }

    #[tokio::test]
    async fn test_load_seeded_entity() {
        let repo = repository();
        let node = repo.load(EntityType::Node, "4").await.unwrap().unwrap();
        assert_eq!(node.label, "Recipes");
        assert!(!node.has_translation("fr-ca"));

        assert!(repo.load(EntityType::TaxonomyTerm, "4").await.unwrap().is_none());
        assert!(repo.load(EntityType::Node, "edit").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_alias() {
        let repo = repository();
        assert_eq!(repo.resolve("/idees").await.unwrap(), "/node/3");
        assert_eq!(repo.resolve("/produce").await.unwrap(), "/taxonomy/term/7");
        assert_eq!(repo.resolve("/unknown").await.unwrap(), "/unknown");
    }
}
