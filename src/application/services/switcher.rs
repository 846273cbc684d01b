//! Language switcher links for the current page.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::services::{DomainResolver, EntityFinder, LanguageManager};
use crate::domain::entities::{SwitcherLink, SwitcherLinks};
use crate::domain::request_context::RequestContext;
use crate::domain::site::SiteConfig;
use crate::error::NegotiationError;

/// Builds one switcher link per native language.
pub struct SwitcherBuilder {
    site: Arc<SiteConfig>,
    languages: Arc<LanguageManager>,
    domains: Arc<DomainResolver>,
    finder: Arc<EntityFinder>,
}

impl SwitcherBuilder {
    pub fn new(
        site: Arc<SiteConfig>,
        languages: Arc<LanguageManager>,
        domains: Arc<DomainResolver>,
        finder: Arc<EntityFinder>,
    ) -> Self {
        Self {
            site,
            languages,
            domains,
            finder,
        }
    }

    /// Builds the switcher for a page rendered in `current_langcode`.
    ///
    /// Links follow the language manager's order. A language is skipped when
    /// the page shows an entity that has no translation in it (front page
    /// excepted). Every link carries the request's query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationError::UnknownLanguage`] for an unconfigured
    /// `current_langcode` and [`NegotiationError::ConfigurationGap`] when a
    /// language has no domain or the active language has no display-name
    /// entry for a candidate.
    pub async fn build_switcher_links(
        &self,
        ctx: &RequestContext,
        current_langcode: &str,
    ) -> Result<SwitcherLinks, NegotiationError> {
        let current_language = self.languages.language(current_langcode).ok_or_else(|| {
            NegotiationError::UnknownLanguage {
                langcode: current_langcode.to_string(),
            }
        })?;
        let names = self.name_table(current_langcode)?;

        let is_front_page = ctx.is_front_page();
        let entity = self
            .finder
            .find_entity(&ctx.requested_path, ctx.route.as_ref())
            .await;

        let mut links = SwitcherLinks::new();
        for language in self.languages.native_languages() {
            let domain = self.domains.domain_for_langcode(&language.id).ok_or_else(|| {
                NegotiationError::gap(format!("no domain serves langcode '{}'", language.id))
            })?;

            if let Some(entity) = &entity
                && !is_front_page
                && !entity.has_translation(&language.id)
            {
                continue;
            }

            let url = if is_front_page {
                if current_language.id == language.id {
                    "/".to_string()
                } else {
                    format!("{}/{}", domain.base_path(), language.prefix())
                }
            } else if self
                .domains
                .language_mismatches_domain(domain, current_language)
            {
                format!(
                    "{}/{}{}",
                    domain.base_path(),
                    language.prefix(),
                    ctx.canonical_path
                )
            } else {
                format!("/{}{}", language.prefix(), ctx.path_without_langcode)
            };

            let title = names.get(&language.id).cloned().ok_or_else(|| {
                NegotiationError::gap(format!(
                    "name table for '{current_langcode}' has no entry for '{}'",
                    language.id
                ))
            })?;

            links.insert(SwitcherLink {
                langcode: language.id.clone(),
                url,
                title,
                query: ctx.query.clone(),
            });
        }

        Ok(links)
    }

    fn name_table(
        &self,
        current_langcode: &str,
    ) -> Result<&BTreeMap<String, String>, NegotiationError> {
        let table_id = self.site.name_table_for.get(current_langcode).ok_or_else(|| {
            NegotiationError::gap(format!("no name table for active language '{current_langcode}'"))
        })?;
        self.site
            .name_tables
            .get(table_id)
            .ok_or_else(|| NegotiationError::gap(format!("name table '{table_id}' is missing")))
    }
}
