//! Filtering of editorial form options by the editor's active domain.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::services::DomainResolver;
use crate::domain::entities::{Domain, is_neutral_langcode};
use crate::error::NegotiationError;

/// One selectable value of a form widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOption {
    pub value: String,
    #[serde(default)]
    pub label: String,
}

/// Domain-access widget state after filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainOptions {
    pub options: Vec<FormOption>,
    /// Preselected value of the domain-access field.
    pub default_value: Option<Vec<String>>,
    /// Preselected value of the domain-source field.
    pub source_default: Option<Vec<String>>,
    /// Whether the "all affiliates" checkbox is shown. Always hidden.
    pub all_affiliates_visible: bool,
}

pub struct EditorialService {
    domains: Arc<DomainResolver>,
}

impl EditorialService {
    pub fn new(domains: Arc<DomainResolver>) -> Self {
        Self { domains }
    }

    /// Language options an editor working in `current_langcode` may pick.
    ///
    /// Drops the langcodes excluded by the domain serving `current_langcode`
    /// and the neutral langcodes.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationError::ConfigurationGap`] when no domain serves
    /// `current_langcode`.
    pub fn filter_language_options(
        &self,
        current_langcode: &str,
        options: Vec<FormOption>,
    ) -> Result<Vec<FormOption>, NegotiationError> {
        let domain = self.domain_of(current_langcode)?;

        Ok(options
            .into_iter()
            .filter(|o| !is_neutral_langcode(&o.value))
            .filter(|o| !domain.excluded_langcodes.contains(&o.value))
            .collect())
    }

    /// Domain options for a content form at `request_path`.
    ///
    /// New content, and translations being added (`/{lang}/node/{id}/translations/add/..`),
    /// are limited to the domain of `current_langcode`, which is preselected
    /// for both domain fields. Other forms keep every option.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationError::ConfigurationGap`] when no domain serves
    /// `current_langcode`.
    pub fn filter_domain_options(
        &self,
        current_langcode: &str,
        request_path: &str,
        is_new: bool,
        options: Vec<FormOption>,
    ) -> Result<DomainOptions, NegotiationError> {
        let domain = self.domain_of(current_langcode)?;

        if !(is_new || is_adding_translation(request_path)) {
            return Ok(DomainOptions {
                options,
                default_value: None,
                source_default: None,
                all_affiliates_visible: false,
            });
        }

        let options = options
            .into_iter()
            .filter(|o| o.value == domain.id || self.domains.domain(&o.value).is_none())
            .collect();

        Ok(DomainOptions {
            options,
            default_value: Some(vec![domain.id.clone()]),
            source_default: Some(vec![domain.id.clone()]),
            all_affiliates_visible: false,
        })
    }

    fn domain_of(&self, langcode: &str) -> Result<&Domain, NegotiationError> {
        self.domains.domain_for_langcode(langcode).ok_or_else(|| {
            NegotiationError::gap(format!("no domain serves langcode '{langcode}'"))
        })
    }
}

/// Segments 4 and 5 of the raw path (after the leading empty one) read `translations/add`.
fn is_adding_translation(request_path: &str) -> bool {
    let path = request_path.split('?').next().unwrap_or(request_path);
    let data: Vec<&str> = path.split('/').collect();
    matches!(
        (data.get(4), data.get(5)),
        (Some(&"translations"), Some(&"add"))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::site::SiteConfig;

    fn service() -> EditorialService {
        let site = Arc::new(SiteConfig::bundled().unwrap());
        EditorialService::new(Arc::new(DomainResolver::new(site)))
    }

    fn options(values: &[&str]) -> Vec<FormOption> {
        values
            .iter()
            .map(|v| FormOption {
                value: v.to_string(),
                label: v.to_uppercase(),
            })
            .collect()
    }

    fn values(options: &[FormOption]) -> Vec<&str> {
        options.iter().map(|o| o.value.as_str()).collect()
    }

    #[test]
    fn test_language_options_primary_domain() {
        let all = options(&["en-us", "en-ca", "fr-ca", "und", "zxx"]);
        let filtered = service().filter_language_options("en-us", all).unwrap();
        assert_eq!(values(&filtered), vec!["en-us"]);
    }

    #[test]
    fn test_language_options_secondary_domain() {
        let all = options(&["en-us", "en-ca", "fr-ca", "und", "zxx"]);
        let filtered = service().filter_language_options("fr-ca", all).unwrap();
        assert_eq!(values(&filtered), vec!["en-ca", "fr-ca"]);
    }

    #[test]
    fn test_language_options_unknown_langcode() {
        let result = service().filter_language_options("de", options(&["en-us"]));
        assert!(matches!(result, Err(NegotiationError::ConfigurationGap(_))));
    }

    #[test]
    fn test_domain_options_new_content() {
        let all = options(&["domain_one", "domain_two"]);
        let filtered = service()
            .filter_domain_options("en-ca", "/en-ca/node/add/page", true, all)
            .unwrap();

        assert_eq!(values(&filtered.options), vec!["domain_two"]);
        assert_eq!(filtered.default_value, Some(vec!["domain_two".to_string()]));
        assert_eq!(filtered.source_default, Some(vec!["domain_two".to_string()]));
        assert!(!filtered.all_affiliates_visible);
    }

    #[test]
    fn test_domain_options_adding_translation() {
        let all = options(&["domain_one", "domain_two", "partner_site"]);
        let filtered = service()
            .filter_domain_options(
                "en-us",
                "/en-us/node/2/translations/add/en-us/fr-ca",
                false,
                all,
            )
            .unwrap();

        assert_eq!(values(&filtered.options), vec!["domain_one", "partner_site"]);
        assert_eq!(filtered.default_value, Some(vec!["domain_one".to_string()]));
    }

    #[test]
    fn test_domain_options_existing_content_untouched() {
        let all = options(&["domain_one", "domain_two"]);
        let filtered = service()
            .filter_domain_options("en-us", "/en-us/node/2/edit", false, all.clone())
            .unwrap();

        assert_eq!(filtered.options, all);
        assert!(filtered.default_value.is_none());
        assert!(filtered.source_default.is_none());
        assert!(!filtered.all_affiliates_visible);
    }

    #[test]
    fn test_is_adding_translation() {
        assert!(is_adding_translation("/fr-ca/node/3/translations/add/en-ca/fr-ca"));
        assert!(is_adding_translation("/fr-ca/node/3/translations/add?destination=x"));
        assert!(!is_adding_translation("/fr-ca/node/3/translations"));
        assert!(!is_adding_translation("/node/3/translations/add"));
    }
}
