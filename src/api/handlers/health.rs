//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Content store**: database `SELECT 1`, or the in-memory store
/// 2. **Cache**: page cache backend ping
/// 3. **Site**: default domain present in the loaded configuration
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let content_check = check_content_store(&state).await;
    let cache_check = check_cache(&state).await;
    let site_check = check_site(&state);

    let all_healthy = content_check.is_ok() && cache_check.is_ok() && site_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checked_at: chrono::Utc::now(),
        checks: HealthChecks {
            content_store: content_check,
            cache: cache_check,
            site: site_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_content_store(state: &AppState) -> CheckStatus {
    match state.entities.ping().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Content store error: {}", e)),
    }
}

async fn check_cache(state: &AppState) -> CheckStatus {
    if state.cache.health_check().await {
        CheckStatus::ok("Page cache available")
    } else {
        CheckStatus::error("Page cache unavailable")
    }
}

fn check_site(state: &AppState) -> CheckStatus {
    match state.domains.default_domain() {
        Some(domain) => CheckStatus::ok(format!(
            "{} domains, {} languages, default domain: {}",
            state.site.domains.len(),
            state.site.languages.len(),
            domain.id
        )),
        None => CheckStatus::error("No default domain configured"),
    }
}
