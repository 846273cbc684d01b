//! Repository trait definitions for the external collaborators.
//!
//! The negotiation core never talks to storage directly; it goes through
//! these traits, implemented in `crate::infrastructure`.
//!
//! # Available Repositories
//!
//! - [`EntityRepository`] - Content entity loading
//! - [`PathAliasRepository`] - Alias to canonical path resolution
//! - [`TokenRepository`] - Editor token lookup
//!
//! Mock implementations are generated via `mockall` for unit tests.

pub mod entity_repository;
pub mod path_alias_repository;
pub mod token_repository;

pub use entity_repository::EntityRepository;
pub use path_alias_repository::PathAliasRepository;
pub use token_repository::TokenRepository;

#[cfg(test)]
pub use entity_repository::MockEntityRepository;
#[cfg(test)]
pub use path_alias_repository::MockPathAliasRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
