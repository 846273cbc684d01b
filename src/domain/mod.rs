//! Domain layer: configuration records, per-request state and collaborator contracts.
//!
//! Nothing here depends on the HTTP stack or on a storage backend.
//!
//! # Architecture
//!
//! - [`entities`] - Domains, languages, content entities and switcher links
//! - [`site`] - The static site configuration and its validation
//! - [`request_context`] - The per-request negotiation snapshot and cache kill switch
//! - [`repositories`] - Storage trait definitions implemented in `crate::infrastructure`

pub mod entities;
pub mod repositories;
pub mod request_context;
pub mod site;

pub use request_context::{CacheKillSwitch, CurrentUser, RawRequest, RequestContext, RouteObject};
pub use site::{SiteConfig, SiteConfigError};
