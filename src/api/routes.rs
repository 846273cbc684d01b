//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{domain_options_handler, language_options_handler};
use crate::error::AppError;
use crate::state::AppState;
use axum::{Router, http::Uri, routing::post};

/// Editorial routes, to be nested under `/api` and protected by Bearer auth.
///
/// # Endpoints
///
/// - `POST /editorial/{langcode}/language-options` - Filter a language widget
/// - `POST /editorial/{langcode}/domain-options`   - Filter a domain-access widget
///
/// Unknown `/api` paths answer a JSON 404 instead of reaching the front door.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/editorial/{langcode}/language-options",
            post(language_options_handler),
        )
        .route(
            "/editorial/{langcode}/domain-options",
            post(domain_options_handler),
        )
        .fallback(api_not_found)
}

async fn api_not_found(uri: Uri) -> AppError {
    AppError::not_found(
        "Unknown API endpoint",
        serde_json::json!({ "path": uri.path() }),
    )
}
