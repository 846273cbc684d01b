//! PostgreSQL repository implementations.
//!
//! # Repositories
//!
//! - [`PgContentRepository`] - Entities, translations and path aliases
//! - [`PgTokenRepository`] - Editor token validation

pub mod pg_content_repository;
pub mod pg_token_repository;

pub use pg_content_repository::PgContentRepository;
pub use pg_token_repository::PgTokenRepository;
