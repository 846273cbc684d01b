//! Language entity and the neutral langcodes that are never selectable.

use serde::{Deserialize, Serialize};

/// Langcodes meaning "not specified" and "not applicable".
///
/// They may exist in the language list (content can be tagged with them) but
/// they are never negotiation targets, switcher entries or editorial options.
pub const NEUTRAL_LANGCODES: [&str; 2] = ["und", "zxx"];

/// Returns true for `und` and `zxx`.
pub fn is_neutral_langcode(langcode: &str) -> bool {
    NEUTRAL_LANGCODES.contains(&langcode)
}

/// A language variant known to the site (e.g. `en-us`, `fr-ca`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: String,
    pub name: String,
    /// URL path prefix; the langcode itself when not configured.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Whether the language is offered natively (switcher candidates).
    #[serde(default = "default_native")]
    pub native: bool,
}

fn default_native() -> bool {
    true
}

impl Language {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prefix: None,
            native: true,
        }
    }

    /// The path prefix used in URLs for this language.
    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(&self.id)
    }

    pub fn is_neutral(&self) -> bool {
        is_neutral_langcode(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_defaults_to_id() {
        let language = Language::new("en-us", "English (US)");
        assert_eq!(language.prefix(), "en-us");

        let prefixed = Language {
            prefix: Some("us".to_string()),
            ..language
        };
        assert_eq!(prefixed.prefix(), "us");
    }

    #[test]
    fn test_neutral_langcodes() {
        assert!(is_neutral_langcode("und"));
        assert!(is_neutral_langcode("zxx"));
        assert!(!is_neutral_langcode("fr-ca"));
        assert!(Language::new("und", "Not specified").is_neutral());
    }

    #[test]
    fn test_native_defaults_to_true_when_deserialized() {
        let language: Language =
            serde_json::from_str(r#"{"id": "fr-ca", "name": "French (CA)"}"#).unwrap();
        assert!(language.native);
        assert!(language.prefix.is_none());
    }
}
