//! Language lookups over the site configuration.

use std::sync::Arc;

use crate::domain::entities::Language;
use crate::domain::site::SiteConfig;
use crate::utils::accept_language::best_matching_langcode;

/// Read-only view of the configured languages.
///
/// Enumeration order is the order of `languages` in the site configuration;
/// switcher links and browser-language tie breaks follow it.
pub struct LanguageManager {
    site: Arc<SiteConfig>,
}

impl LanguageManager {
    pub fn new(site: Arc<SiteConfig>) -> Self {
        Self { site }
    }

    pub fn languages(&self) -> &[Language] {
        &self.site.languages
    }

    pub fn language(&self, id: &str) -> Option<&Language> {
        self.site.language(id)
    }

    /// Languages offered to visitors: native and not neutral.
    pub fn native_languages(&self) -> impl Iterator<Item = &Language> {
        self.site
            .languages
            .iter()
            .filter(|l| l.native && !l.is_neutral())
    }

    /// The selectable language whose URL prefix is `prefix`.
    pub fn language_for_prefix(&self, prefix: &str) -> Option<&Language> {
        self.site
            .languages
            .iter()
            .find(|l| !l.is_neutral() && l.prefix() == prefix)
    }

    pub fn default_langcode(&self) -> &str {
        &self.site.default_langcode
    }

    /// Best site langcode for an `Accept-Language` value.
    ///
    /// Always returns a configured, non-neutral langcode: the site default is
    /// used when nothing in the header matches.
    pub fn browser_langcode(&self, accept_language: Option<&str>) -> String {
        let candidates: Vec<&str> = self
            .site
            .languages
            .iter()
            .filter(|l| !l.is_neutral())
            .map(|l| l.id.as_str())
            .collect();

        best_matching_langcode(accept_language, &candidates, &self.site.language_mappings)
            .unwrap_or_else(|| self.site.default_langcode.clone())
    }
}
