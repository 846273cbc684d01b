//! Language switcher links built per request.

use serde::Serialize;

/// One entry of the language switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitcherLink {
    pub langcode: String,
    pub url: String,
    pub title: String,
    /// Query parameters of the original request, carried over verbatim.
    pub query: Vec<(String, String)>,
}

impl SwitcherLink {
    /// The link target with the preserved query string appended.
    pub fn href(&self) -> String {
        crate::utils::url::with_query(&self.url, &self.query)
    }
}

/// Switcher links keyed by langcode, in the language manager's enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SwitcherLinks {
    links: Vec<SwitcherLink>,
}

impl SwitcherLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a link, replacing any existing entry for the same langcode in place.
    pub fn insert(&mut self, link: SwitcherLink) {
        match self.links.iter_mut().find(|l| l.langcode == link.langcode) {
            Some(existing) => *existing = link,
            None => self.links.push(link),
        }
    }

    pub fn get(&self, langcode: &str) -> Option<&SwitcherLink> {
        self.links.iter().find(|l| l.langcode == langcode)
    }

    pub fn contains(&self, langcode: &str) -> bool {
        self.get(langcode).is_some()
    }

    pub fn langcodes(&self) -> Vec<&str> {
        self.links.iter().map(|l| l.langcode.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SwitcherLink> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<'a> IntoIterator for &'a SwitcherLinks {
    type Item = &'a SwitcherLink;
    type IntoIter = std::slice::Iter<'a, SwitcherLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}
