//! Domain entity representing one market/brand site.

use serde::{Deserialize, Serialize};
use url::Url;

/// A market site sharing the CMS instance (e.g. the `.com` and `.ca` sites).
///
/// Domains are static configuration: loaded once at startup and never mutated.
/// The `langcodes` list is ordered; its exclusivity against sibling domains is
/// whatever the configuration says, nothing is hard-coded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    /// Scheme and host the domain is served from, e.g. `https://www.example.ca`.
    pub base_url: String,
    /// Extra hostnames mapped to this domain besides the `base_url` host.
    #[serde(default)]
    pub hostnames: Vec<String>,
    /// Domain used for hosts that match no other domain.
    #[serde(default)]
    pub is_default: bool,
    /// Langcodes served by this domain, in preference order.
    pub langcodes: Vec<String>,
    pub default_langcode: String,
    /// When set, the bare front page of this domain always redirects to this langcode.
    #[serde(default)]
    pub front_page_langcode: Option<String>,
    /// Langcodes hidden from editors working in this domain.
    #[serde(default)]
    pub excluded_langcodes: Vec<String>,
}

impl Domain {
    /// Whether `langcode` is in this domain's allowed set.
    pub fn allows(&self, langcode: &str) -> bool {
        self.langcodes.iter().any(|l| l == langcode)
    }

    /// Base URL without trailing slash.
    pub fn base_path(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Host part of `base_url`, if it parses.
    pub fn base_host(&self) -> Option<String> {
        Url::parse(&self.base_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
    }

    /// Whether a request host (already stripped of its port) belongs to this domain.
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.');
        self.base_host()
            .is_some_and(|base| base.eq_ignore_ascii_case(host))
            || self.hostnames.iter().any(|h| h.eq_ignore_ascii_case(host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_domain() -> Domain {
        Domain {
            id: "domain_two".to_string(),
            base_url: "https://www.example.ca/".to_string(),
            hostnames: vec!["example.ca".to_string()],
            is_default: false,
            langcodes: vec!["en-ca".to_string(), "fr-ca".to_string()],
            default_langcode: "en-ca".to_string(),
            front_page_langcode: Some("en-ca".to_string()),
            excluded_langcodes: vec!["en-us".to_string()],
        }
    }

    #[test]
    fn test_allows() {
        let domain = test_domain();
        assert!(domain.allows("en-ca"));
        assert!(domain.allows("fr-ca"));
        assert!(!domain.allows("en-us"));
    }

    #[test]
    fn test_base_path_trims_slash() {
        assert_eq!(test_domain().base_path(), "https://www.example.ca");
    }

    #[test]
    fn test_matches_host() {
        let domain = test_domain();
        assert!(domain.matches_host("www.example.ca"));
        assert!(domain.matches_host("WWW.EXAMPLE.CA"));
        assert!(domain.matches_host("example.ca"));
        assert!(domain.matches_host("example.ca."));
        assert!(!domain.matches_host("www.example.com"));
    }
}
