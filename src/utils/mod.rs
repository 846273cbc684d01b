//! Helper functions shared across layers.
//!
//! - [`host`] - Host extraction from HTTP headers
//! - [`url`] - Path segment and query-string helpers
//! - [`accept_language`] - Browser language matching
//! - [`token`] - Editor token generation and hashing

pub mod accept_language;
pub mod host;
pub mod token;
pub mod url;
