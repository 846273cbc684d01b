//! HTTP middleware for request processing and protection.
//!
//! Provides authentication, identification, page caching, rate limiting and
//! observability middleware.

pub mod auth;
pub mod identify;
pub mod page_cache;
pub mod rate_limit;
pub mod tracing;
