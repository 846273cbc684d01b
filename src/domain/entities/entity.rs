//! Content entities owned by the CMS content store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Entity types whose pages take part in language switching.
///
/// The order of [`EntityType::ALL`] is the route-matching priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Node,
    TaxonomyTerm,
}

impl EntityType {
    pub const ALL: [EntityType; 2] = [EntityType::Node, EntityType::TaxonomyTerm];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Node => "node",
            EntityType::TaxonomyTerm => "taxonomy_term",
        }
    }

    /// Placeholder used for the entity id in link templates, e.g. `{node}`.
    pub fn placeholder(&self) -> String {
        format!("{{{}}}", self.as_str())
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "node" => Ok(EntityType::Node),
            "taxonomy_term" => Ok(EntityType::TaxonomyTerm),
            other => Err(format!("unknown entity type '{other}'")),
        }
    }
}

/// A loaded content entity and the langcodes it has translations in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntity {
    pub entity_type: EntityType,
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub translations: BTreeSet<String>,
}

impl ContentEntity {
    pub fn has_translation(&self, langcode: &str) -> bool {
        self.translations.contains(langcode)
    }
}
