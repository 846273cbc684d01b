//! In-memory repositories used when no database is configured.

pub mod memory_content_repository;
pub mod memory_token_repository;

pub use memory_content_repository::MemoryContentRepository;
pub use memory_token_repository::MemoryTokenRepository;
