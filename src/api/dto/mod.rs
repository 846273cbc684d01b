//! Data Transfer Objects for the JSON endpoints.
//!
//! Request DTOs are validated with `validator` before they reach a service.

pub mod editorial;
pub mod health;
