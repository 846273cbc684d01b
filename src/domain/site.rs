//! Static site configuration: domains, languages and the negotiation tables.
//!
//! The configuration is a JSON document loaded once at startup (see
//! [`crate::config::Config::site_config_path`]); when no file is configured the
//! bundled `config/site.json` is used. Each domain is a profile record looked up
//! by id, so adding a market means adding a record, not a code branch.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::domain::entities::{ContentEntity, Domain, Language, is_neutral_langcode};

const BUNDLED_SITE_CONFIG: &str = include_str!("../../config/site.json");

/// Errors raised while loading or validating the site configuration.
#[derive(Debug, thiserror::Error)]
pub enum SiteConfigError {
    #[error("Failed to read site configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse site configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid site configuration: {0}")]
    Invalid(String),
}

/// Browser languages that send visitors of the bare front page to a fixed variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryLanguageRule {
    pub browser_langcodes: Vec<String>,
    pub target_langcode: String,
}

/// Link templates per entity type, e.g. `/node/{node}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTemplates {
    #[serde(default)]
    pub node: Vec<String>,
    #[serde(default)]
    pub taxonomy_term: Vec<String>,
}

/// An editor allowed to use the editorial endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    pub id: String,
    /// HMAC-SHA256 of the bearer token, hex encoded.
    pub token_hash: String,
}

/// Content used by the in-memory store when no database is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedContent {
    #[serde(default)]
    pub entities: Vec<ContentEntity>,
    /// Alias path to canonical path, e.g. `/solutions` -> `/node/1`.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Language used when no browser preference matches.
    pub default_langcode: String,
    /// Languages in enumeration order.
    pub languages: Vec<Language>,
    /// Domains in lookup order; the first domain allowing a langcode owns it.
    pub domains: Vec<Domain>,
    /// `Accept-Language` value to site langcode.
    #[serde(default)]
    pub language_mappings: BTreeMap<String, String>,
    /// Generic path prefixes and the variants they stand for, e.g. `en` -> `[en-us, en-ca]`.
    #[serde(default)]
    pub prefix_aliases: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub secondary_language: Option<SecondaryLanguageRule>,
    /// Switcher display-name tables by table id.
    #[serde(default)]
    pub name_tables: BTreeMap<String, BTreeMap<String, String>>,
    /// Active langcode to the name table its switcher renders with.
    #[serde(default)]
    pub name_table_for: BTreeMap<String, String>,
    /// Path prefixes or templates of admin routes.
    #[serde(default = "default_admin_routes")]
    pub admin_routes: Vec<String>,
    #[serde(default)]
    pub link_templates: LinkTemplates,
    #[serde(default)]
    pub editors: Vec<EditorConfig>,
    #[serde(default)]
    pub content: SeedContent,
}

fn invalid(msg: String) -> Result<(), SiteConfigError> {
    Err(SiteConfigError::Invalid(msg))
}

fn default_admin_routes() -> Vec<String> {
    vec!["/admin".to_string()]
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self, SiteConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SiteConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// The configuration shipped with the crate (two markets, three languages).
    pub fn bundled() -> Result<Self, SiteConfigError> {
        Self::from_json(BUNDLED_SITE_CONFIG)
    }

    pub fn language(&self, id: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.id == id)
    }

    pub fn domain(&self, id: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.id == id)
    }

    /// Checks referential integrity between the tables.
    ///
    /// # Errors
    ///
    /// Returns [`SiteConfigError::Invalid`] naming the first broken reference.
    pub fn validate(&self) -> Result<(), SiteConfigError> {
        if self.languages.is_empty() {
            return invalid("at least one language is required".to_string());
        }
        if self.domains.is_empty() {
            return invalid("at least one domain is required".to_string());
        }

        let mut seen = BTreeSet::new();
        for language in &self.languages {
            if !seen.insert(language.id.as_str()) {
                return invalid(format!("duplicate language '{}'", language.id));
            }
        }

        let known = |code: &str| self.language(code).is_some() && !is_neutral_langcode(code);

        if !known(&self.default_langcode) {
            return invalid(format!(
                "default_langcode '{}' is not a selectable language",
                self.default_langcode
            ));
        }

        let defaults = self.domains.iter().filter(|d| d.is_default).count();
        if defaults != 1 {
            return invalid(format!("exactly one default domain is required, got {defaults}"));
        }

        let mut domain_ids = BTreeSet::new();
        for domain in &self.domains {
            if !domain_ids.insert(domain.id.as_str()) {
                return invalid(format!("duplicate domain '{}'", domain.id));
            }
            if url::Url::parse(&domain.base_url).is_err() {
                return invalid(format!(
                    "domain '{}' has an invalid base_url '{}'",
                    domain.id, domain.base_url
                ));
            }
            for code in &domain.langcodes {
                if !known(code) {
                    return invalid(format!(
                        "domain '{}' allows unknown or neutral langcode '{}'",
                        domain.id, code
                    ));
                }
            }
            if !domain.allows(&domain.default_langcode) {
                return invalid(format!(
                    "domain '{}' default_langcode '{}' is not in its langcodes",
                    domain.id, domain.default_langcode
                ));
            }
            if let Some(front) = &domain.front_page_langcode
                && !domain.allows(front)
            {
                return invalid(format!(
                    "domain '{}' front_page_langcode '{}' is not in its langcodes",
                    domain.id, front
                ));
            }
        }

        let owned = |code: &str| self.domains.iter().any(|d| d.allows(code));

        for (browser, site) in &self.language_mappings {
            if !known(site) {
                return invalid(format!("mapping '{browser}' targets unknown langcode '{site}'"));
            }
        }

        for (alias, variants) in &self.prefix_aliases {
            if self.languages.iter().any(|l| l.prefix() == alias) {
                return invalid(format!("prefix alias '{alias}' shadows a language prefix"));
            }
            if variants.is_empty() {
                return invalid(format!("prefix alias '{alias}' has no variants"));
            }
            if let Some(code) = variants.iter().find(|v| !owned(v)) {
                return invalid(format!(
                    "prefix alias '{alias}' variant '{code}' belongs to no domain"
                ));
            }
        }

        if let Some(rule) = &self.secondary_language
            && !owned(&rule.target_langcode)
        {
            return invalid(format!(
                "secondary language target '{}' belongs to no domain",
                rule.target_langcode
            ));
        }

        for (active, table) in &self.name_table_for {
            if !self.name_tables.contains_key(table) {
                return invalid(format!(
                    "langcode '{active}' refers to missing name table '{table}'"
                ));
            }
        }

        for (table_id, table) in &self.name_tables {
            if let Some(code) = table.keys().find(|code| is_neutral_langcode(code)) {
                return invalid(format!("name table '{table_id}' names neutral langcode '{code}'"));
            }
        }

        Ok(())
    }
}
