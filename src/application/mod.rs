//! Application layer: the negotiation engine and the services around it.
//!
//! Services take their collaborators through their constructors (site
//! configuration, repository trait objects) and hold no per-request state;
//! everything request-specific lives in [`crate::domain::RequestContext`].
//!
//! # Available Services
//!
//! - [`services::RequestContextBuilder`] - Builds the per-request snapshot
//! - [`services::DomainResolver`] - Domain and language lookups
//! - [`services::EntityFinder`] - Entity behind the current route
//! - [`services::Negotiator`] - Langcode negotiation and redirect decision
//! - [`services::SwitcherBuilder`] - Language switcher links
//! - [`services::EditorialService`] - Editorial option filtering
//! - [`services::AuthService`] - Editor token authentication

pub mod services;
