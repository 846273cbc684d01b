//! HTTP request handlers.

pub mod editorial;
pub mod front_door;
pub mod health;

pub use editorial::{domain_options_handler, language_options_handler};
pub use front_door::front_door_handler;
pub use health::health_handler;
