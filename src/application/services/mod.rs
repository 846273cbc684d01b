//! Services of the negotiation layer.
//!
//! Construction order follows the dependencies: lookups over the site
//! configuration first ([`LanguageManager`], [`DomainResolver`],
//! [`RouteMatcher`]), then the services that use them.

pub mod auth_service;
pub mod context_builder;
pub mod domain_resolver;
pub mod editorial;
pub mod entity_finder;
pub mod language_manager;
pub mod negotiator;
pub mod route_matcher;
pub mod switcher;

pub use auth_service::AuthService;
pub use context_builder::RequestContextBuilder;
pub use domain_resolver::DomainResolver;
pub use editorial::{DomainOptions, EditorialService, FormOption};
pub use entity_finder::EntityFinder;
pub use language_manager::LanguageManager;
pub use negotiator::{Decision, DecisionReason, Negotiator, OutboundOptions};
pub use route_matcher::RouteMatcher;
pub use switcher::SwitcherBuilder;
