//! Domain and language lookups: which domain serves a host or a langcode.

use std::sync::Arc;

use crate::domain::entities::{Domain, Language, is_neutral_langcode};
use crate::domain::site::SiteConfig;
use crate::error::NegotiationError;

/// Pure lookups over the configured domains. Safe to share between requests.
pub struct DomainResolver {
    site: Arc<SiteConfig>,
}

impl DomainResolver {
    pub fn new(site: Arc<SiteConfig>) -> Self {
        Self { site }
    }

    pub fn domains(&self) -> &[Domain] {
        &self.site.domains
    }

    pub fn domain(&self, id: &str) -> Option<&Domain> {
        self.site.domain(id)
    }

    pub fn default_domain(&self) -> Option<&Domain> {
        self.site.domains.iter().find(|d| d.is_default)
    }

    /// The domain serving `host`, or the default domain for unmapped hosts.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationError::UnknownDomain`] when no domain matches and
    /// none is marked as default.
    pub fn active_domain(&self, host: &str) -> Result<&Domain, NegotiationError> {
        self.site
            .domains
            .iter()
            .find(|d| d.matches_host(host))
            .or_else(|| self.default_domain())
            .ok_or_else(|| NegotiationError::UnknownDomain {
                host: host.to_string(),
            })
    }

    /// The first domain, in configuration order, allowing `langcode`.
    ///
    /// Unknown and neutral langcodes have no domain.
    pub fn domain_for_langcode(&self, langcode: &str) -> Option<&Domain> {
        if is_neutral_langcode(langcode) {
            return None;
        }
        self.site.domains.iter().find(|d| d.allows(langcode))
    }

    pub fn languages_allowed_for<'a>(&self, domain: &'a Domain) -> &'a [String] {
        &domain.langcodes
    }

    /// True when `language` is not served by `domain`.
    pub fn language_mismatches_domain(&self, domain: &Domain, language: &Language) -> bool {
        !self
            .languages_allowed_for(domain)
            .iter()
            .any(|code| *code == language.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> DomainResolver {
        DomainResolver::new(Arc::new(SiteConfig::bundled().unwrap()))
    }

    #[test]
    fn test_active_domain_by_host() {
        let resolver = resolver();
        assert_eq!(resolver.active_domain("www.example.ca").unwrap().id, "domain_two");
        assert_eq!(resolver.active_domain("example.ca").unwrap().id, "domain_two");
        assert_eq!(resolver.active_domain("www.example.com").unwrap().id, "domain_one");
    }

    #[test]
    fn test_active_domain_falls_back_to_default() {
        assert_eq!(resolver().active_domain("localhost").unwrap().id, "domain_one");
    }

    #[test]
    fn test_active_domain_without_default() {
        let mut site = SiteConfig::bundled().unwrap();
        site.domains.iter_mut().for_each(|d| d.is_default = false);
        let resolver = DomainResolver::new(Arc::new(site));
        assert_eq!(
            resolver.active_domain("localhost"),
            Err(NegotiationError::UnknownDomain {
                host: "localhost".to_string()
            })
        );
    }

    #[test]
    fn test_domain_for_langcode() {
        let resolver = resolver();
        assert_eq!(resolver.domain_for_langcode("en-us").unwrap().id, "domain_one");
        assert_eq!(resolver.domain_for_langcode("en-ca").unwrap().id, "domain_two");
        assert_eq!(resolver.domain_for_langcode("fr-ca").unwrap().id, "domain_two");
        assert!(resolver.domain_for_langcode("de").is_none());
        assert!(resolver.domain_for_langcode("und").is_none());
        assert!(resolver.domain_for_langcode("zxx").is_none());
    }

    #[test]
    fn test_mismatch_is_inverse_of_allowed() {
        let site = SiteConfig::bundled().unwrap();
        let resolver = DomainResolver::new(Arc::new(site.clone()));

        for domain in resolver.domains() {
            for language in &site.languages {
                let allowed = resolver
                    .languages_allowed_for(domain)
                    .contains(&language.id);
                assert_eq!(
                    resolver.language_mismatches_domain(domain, language),
                    !allowed,
                    "{} / {}",
                    domain.id,
                    language.id
                );
            }
        }
    }
}
