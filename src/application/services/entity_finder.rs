//! Locating the content entity behind the current page.

use std::sync::Arc;

use crate::application::services::route_matcher::templates_for;
use crate::domain::entities::{ContentEntity, EntityType};
use crate::domain::repositories::{EntityRepository, PathAliasRepository};
use crate::domain::request_context::RouteObject;
use crate::domain::site::SiteConfig;

/// Finds the node or taxonomy term a route points at.
///
/// Every lookup is total: a missing route, template, alias or entity and an
/// out-of-range id position all come back as `None`. Storage errors are logged
/// and treated the same way.
pub struct EntityFinder {
    site: Arc<SiteConfig>,
    entities: Arc<dyn EntityRepository>,
    aliases: Arc<dyn PathAliasRepository>,
}

impl EntityFinder {
    pub fn new(
        site: Arc<SiteConfig>,
        entities: Arc<dyn EntityRepository>,
        aliases: Arc<dyn PathAliasRepository>,
    ) -> Self {
        Self {
            site,
            entities,
            aliases,
        }
    }

    /// The entity type whose link templates contain the route's template.
    ///
    /// Nodes are checked before taxonomy terms and the first match wins.
    pub fn find_entity_type(&self, route: Option<&RouteObject>) -> Option<EntityType> {
        let route = route?;
        EntityType::ALL
            .into_iter()
            .find(|t| templates_for(&self.site, *t).contains(&route.path))
    }

    /// All link templates of the entity type the route belongs to.
    pub fn find_entity_links(&self, route: Option<&RouteObject>) -> Option<&[String]> {
        self.find_entity_type(route)
            .map(|t| templates_for(&self.site, t))
    }

    /// Loads the entity for a language-prefixed request path.
    ///
    /// The id position is derived from where the placeholder sits in the route
    /// template. When the segment just before that position is anything but
    /// `node`, the entity is loaded from the earlier segment instead; this is
    /// what makes both `/node/{node}` and `/taxonomy/term/{taxonomy_term}`
    /// resolve from their canonical paths.
    pub async fn find_entity(
        &self,
        path: &str,
        route: Option<&RouteObject>,
    ) -> Option<ContentEntity> {
        let route = route?;
        let entity_type = self.find_entity_type(Some(route))?;
        let position = placeholder_position(&route.path, entity_type);

        let without_langcode = strip_first_segment(path);
        let entity_path = match self.aliases.resolve(&without_langcode).await {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(error = %e, path = %without_langcode, "Alias lookup failed");
                without_langcode
            }
        };

        // Leading empty element kept so positions line up with the template.
        let args: Vec<&str> = entity_path.split('/').collect();

        let mut entity = match args.get(position) {
            Some(id) => self.load(entity_type, id).await,
            None => None,
        };
        if let Some(previous) = position.checked_sub(1).and_then(|i| args.get(i))
            && *previous != "node"
        {
            entity = self.load(entity_type, previous).await;
        }

        entity
    }

    async fn load(&self, entity_type: EntityType, id: &str) -> Option<ContentEntity> {
        if id.is_empty() {
            return None;
        }
        match self.entities.load(entity_type, id).await {
            Ok(entity) => entity,
            Err(e) => {
                tracing::warn!(error = %e, %entity_type, id, "Entity load failed");
                None
            }
        }
    }
}

/// One past the count of non-empty template segments up to and including the placeholder.
fn placeholder_position(template: &str, entity_type: EntityType) -> usize {
    let placeholder = entity_type.placeholder();
    let mut position = 0;
    for part in template.split('/') {
        if !part.is_empty() {
            position += 1;
        }
        if part == placeholder {
            break;
        }
    }
    position + 1
}

/// Drops the first path segment: `/en-us/solutions` becomes `/solutions`.
fn strip_first_segment(path: &str) -> String {
    let rest: Vec<&str> = path.split('/').skip(2).collect();
    format!("/{}", rest.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockEntityRepository, MockPathAliasRepository};
    use crate::error::AppError;
    use mockall::predicate::eq;

    fn entity(entity_type: EntityType, id: &str, translations: &[&str]) -> ContentEntity {
        ContentEntity {
            entity_type,
            id: id.to_string(),
            label: format!("{entity_type} {id}"),
            translations: translations.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn route(path: &str) -> RouteObject {
        RouteObject {
            path: path.to_string(),
        }
    }

    fn aliases(alias: &'static str, target: &'static str) -> MockPathAliasRepository {
        let mut mock = MockPathAliasRepository::new();
        mock.expect_resolve().returning(move |path| {
            Ok(if path == alias {
                target.to_string()
            } else {
                path.to_string()
            })
        });
        mock
    }

    fn finder(entities: MockEntityRepository, aliases: MockPathAliasRepository) -> EntityFinder {
        EntityFinder::new(
            Arc::new(SiteConfig::bundled().unwrap()),
            Arc::new(entities),
            Arc::new(aliases),
        )
    }

    #[test]
    fn test_placeholder_position() {
        assert_eq!(placeholder_position("/node/{node}", EntityType::Node), 3);
        assert_eq!(placeholder_position("/node/{node}/edit", EntityType::Node), 3);
        assert_eq!(
            placeholder_position("/taxonomy/term/{taxonomy_term}", EntityType::TaxonomyTerm),
            4
        );
    }

    #[test]
    fn test_strip_first_segment() {
        assert_eq!(strip_first_segment("/en-us/solutions"), "/solutions");
        assert_eq!(strip_first_segment("/en-us"), "/");
        assert_eq!(strip_first_segment("/"), "/");
        assert_eq!(strip_first_segment("/fr-ca/node/3/edit"), "/node/3/edit");
    }

    #[test]
    fn test_find_entity_type_priority() {
        let finder = finder(MockEntityRepository::new(), MockPathAliasRepository::new());
        assert_eq!(
            finder.find_entity_type(Some(&route("/node/{node}"))),
            Some(EntityType::Node)
        );
        assert_eq!(
            finder.find_entity_type(Some(&route("/taxonomy/term/{taxonomy_term}"))),
            Some(EntityType::TaxonomyTerm)
        );
        assert_eq!(finder.find_entity_type(Some(&route("/user/{user}"))), None);
        assert_eq!(finder.find_entity_type(None), None);
        assert_eq!(
            finder
                .find_entity_links(Some(&route("/node/{node}/edit")))
                .map(<[String]>::len),
            Some(4)
        );
    }

    #[tokio::test]
    async fn test_find_entity_via_alias() {
        let mut entities = MockEntityRepository::new();
        entities
            .expect_load()
            .with(eq(EntityType::Node), eq("1"))
            .times(1)
            .returning(|t, id| Ok(Some(entity(t, id, &["en-us"]))));

        let finder = finder(entities, aliases("/solutions", "/node/1"));
        let found = finder
            .find_entity("/en-us/solutions", Some(&route("/node/{node}")))
            .await
            .unwrap();
        assert_eq!(found.id, "1");
    }

    #[tokio::test]
    async fn test_find_entity_edit_route_prefers_previous_segment() {
        let mut entities = MockEntityRepository::new();
        entities
            .expect_load()
            .with(eq(EntityType::Node), eq("edit"))
            .returning(|_, _| Ok(None));
        entities
            .expect_load()
            .with(eq(EntityType::Node), eq("3"))
            .returning(|t, id| Ok(Some(entity(t, id, &["en-ca"]))));

        let finder = finder(entities, aliases("", ""));
        let found = finder
            .find_entity("/en-ca/node/3/edit", Some(&route("/node/{node}/edit")))
            .await
            .unwrap();
        assert_eq!(found.id, "3");
    }

    #[tokio::test]
    async fn test_find_entity_taxonomy_term() {
        let mut entities = MockEntityRepository::new();
        entities
            .expect_load()
            .with(eq(EntityType::TaxonomyTerm), eq("7"))
            .returning(|t, id| Ok(Some(entity(t, id, &["fr-ca"]))));

        let finder = finder(entities, aliases("/produce", "/taxonomy/term/7"));
        let found = finder
            .find_entity(
                "/fr-ca/produce",
                Some(&route("/taxonomy/term/{taxonomy_term}")),
            )
            .await;
        assert_eq!(found.map(|e| e.id), Some("7".to_string()));
    }

    #[tokio::test]
    async fn test_find_entity_out_of_range_is_none() {
        // "/en-us" resolves to "/", far shorter than the template.
        let finder = finder(MockEntityRepository::new(), aliases("", ""));
        let found = finder
            .find_entity("/en-us", Some(&route("/taxonomy/term/{taxonomy_term}")))
            .await;
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_entity_without_route() {
        let finder = finder(MockEntityRepository::new(), MockPathAliasRepository::new());
        assert!(finder.find_entity("/en-us/solutions", None).await.is_none());
    }

    #[tokio::test]
    async fn test_find_entity_storage_error_is_none() {
        let mut entities = MockEntityRepository::new();
        entities
            .expect_load()
            .returning(|_, _| Err(AppError::internal("Database error", serde_json::json!({}))));

        let finder = finder(entities, aliases("/solutions", "/node/1"));
        let found = finder
            .find_entity("/en-us/solutions", Some(&route("/node/{node}")))
            .await;
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_entity_is_idempotent() {
        let mut entities = MockEntityRepository::new();
        entities
            .expect_load()
            .returning(|t, id| Ok(Some(entity(t, id, &["en-us"]))));

        let finder = finder(entities, aliases("/solutions", "/node/1"));
        let route = route("/node/{node}");
        let first = finder.find_entity("/en-us/solutions", Some(&route)).await;
        let second = finder.find_entity("/en-us/solutions", Some(&route)).await;
        assert_eq!(first, second);
        assert!(first.is_some());
    }
}
