//! HTTP layer: handlers, DTOs, middleware and route composition.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for the JSON endpoints
//! - [`handlers`] - Front door, editorial and health handlers
//! - [`middleware`] - Authentication, page cache and request processing middleware
//! - [`routes`] - API route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
