//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`  - Health check: content store, page cache, site (public)
//! - `/api/*`        - Editorial API (Bearer token required)
//! - everything else - Front door: language negotiation, redirect or page
//!
//! # Middleware (outer to inner)
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (not on `/health`)
//! - **Page cache** - Anonymous `GET` responses of the front door
//! - **Identification** - Optional editor bearer token on the front door
//! - **Authentication** - Required editor bearer token on `/api`
//!
//! Trailing slashes are trimmed by [`crate::server`] before routing.

use crate::api;
use crate::api::handlers::{front_door_handler, health_handler};
use crate::api::middleware::rate_limit::RateLimitLayer;
use crate::api::middleware::{auth, identify, page_cache, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP limiter; the router must then be served with
///   connect info so the peer address is known
pub fn app_router(state: AppState, rate_limit: Option<RateLimitLayer>) -> Router {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let front_door = Router::new()
        .fallback(front_door_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            identify::layer,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            page_cache::layer,
        ));

    let mut site = Router::new().nest("/api", api_router).merge(front_door);
    if let Some(rate_limit) = rate_limit {
        site = site.layer(rate_limit);
    }

    Router::new()
        .route("/health", get(health_handler))
        .merge(site)
        .with_state(state)
        .layer(tracing::layer())
}
