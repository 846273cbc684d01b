//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the domain repository traits and the page
//! cache backends.
//!
//! # Modules
//!
//! - [`cache`] - Page cache (Redis, in-memory and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - Repositories seeded from the site configuration

pub mod cache;
pub mod memory;
pub mod persistence;
