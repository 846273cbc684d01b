//! Core domain entities of the negotiation layer.
//!
//! # Entity Types
//!
//! - [`Domain`] - A market site with its allowed langcodes
//! - [`Language`] - A language variant known to the site
//! - [`ContentEntity`] - A node or taxonomy term with its translations
//! - [`SwitcherLink`] / [`SwitcherLinks`] - Language switcher output
//!
//! Domains and languages are immutable configuration; entities and switcher
//! links are derived per request and never persisted by this crate.

pub mod domain;
pub mod entity;
pub mod language;
pub mod switcher_link;

pub use domain::Domain;
pub use entity::{ContentEntity, EntityType};
pub use language::{Language, NEUTRAL_LANGCODES, is_neutral_langcode};
pub use switcher_link::{SwitcherLink, SwitcherLinks};
