//! Anonymous page cache in front of the front door.

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::CacheKillSwitch;
use crate::error::AppError;
use crate::infrastructure::cache::CachedResponse;
use crate::state::AppState;
use crate::utils::host::extract_host_from_headers;

pub const X_PAGE_CACHE: HeaderName = HeaderName::from_static("x-page-cache");

/// Pages bigger than this are served but never stored.
const MAX_CACHED_BODY: usize = 2 * 1024 * 1024;

const CACHEABLE_STATUSES: [StatusCode; 5] = [
    StatusCode::OK,
    StatusCode::MOVED_PERMANENTLY,
    StatusCode::FOUND,
    StatusCode::TEMPORARY_REDIRECT,
    StatusCode::PERMANENT_REDIRECT,
];

/// Serves and stores anonymous `GET` responses keyed by host, path and query.
///
/// The key ignores `Accept-Language` and the user, so every miss runs with a
/// fresh [`CacheKillSwitch`] in the request extensions. Anything downstream
/// that makes the response depend on those signals triggers it, and the
/// response is then passed through without being stored.
///
/// # Response header
///
/// `x-page-cache: HIT | MISS | BYPASS`
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(key) = cache_key(&req) else {
        let mut response = next.run(req).await;
        set_marker(&mut response, "BYPASS");
        return response;
    };

    match st.cache.get_page(&key).await {
        Ok(Some(cached)) => {
            tracing::debug!(key = %key, "Page cache hit");
            let mut response = from_cached(cached);
            set_marker(&mut response, "HIT");
            return response;
        }
        Ok(None) => tracing::debug!(key = %key, "Page cache miss"),
        Err(e) => tracing::warn!(key = %key, error = %e, "Page cache read failed"),
    }

    let kill_switch = CacheKillSwitch::new();
    req.extensions_mut().insert(kill_switch.clone());

    let response = next.run(req).await;

    if kill_switch.is_triggered() || !CACHEABLE_STATUSES.contains(&response.status()) {
        let mut response = response;
        set_marker(&mut response, "MISS");
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, MAX_CACHED_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(key = %key, error = %e, "Failed to buffer response for the page cache");
            return AppError::internal("Failed to read response body", serde_json::json!({}))
                .into_response();
        }
    };

    if let Ok(body) = std::str::from_utf8(&bytes) {
        let entry = CachedResponse {
            status: parts.status.as_u16(),
            location: header_string(&parts.headers, header::LOCATION),
            content_type: header_string(&parts.headers, header::CONTENT_TYPE),
            content_language: header_string(&parts.headers, header::CONTENT_LANGUAGE),
            body: body.to_string(),
        };
        if let Err(e) = st.cache.set_page(&key, &entry, None).await {
            tracing::warn!(key = %key, error = %e, "Page cache write failed");
        }
    }

    let mut response = Response::from_parts(parts, Body::from(bytes));
    set_marker(&mut response, "MISS");
    response
}

/// `None` when the request must not touch the cache.
fn cache_key(req: &Request) -> Option<String> {
    if req.method() != Method::GET || req.headers().contains_key(header::AUTHORIZATION) {
        return None;
    }
    let path = req.uri().path();
    if path == "/health" || path == "/api" || path.starts_with("/api/") {
        return None;
    }

    let host = extract_host_from_headers(req.headers()).ok()?;
    Some(match req.uri().query() {
        Some(query) => format!("{host}{path}?{query}"),
        None => format!("{host}{path}"),
    })
}

fn header_string(headers: &axum::http::HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn from_cached(cached: CachedResponse) -> Response {
    let status = StatusCode::from_u16(cached.status).unwrap_or(StatusCode::OK);
    let mut response = (status, cached.body).into_response();

    let headers = response.headers_mut();
    if let Some(location) = cached.location.and_then(|v| HeaderValue::from_str(&v).ok()) {
        headers.insert(header::LOCATION, location);
    }
    if let Some(content_type) = cached
        .content_type
        .and_then(|v| HeaderValue::from_str(&v).ok())
    {
        headers.insert(header::CONTENT_TYPE, content_type);
    }
    if let Some(content_language) = cached
        .content_language
        .and_then(|v| HeaderValue::from_str(&v).ok())
    {
        headers.insert(header::CONTENT_LANGUAGE, content_language);
    }
    response
}

fn set_marker(response: &mut Response, value: &'static str) {
    response
        .headers_mut()
        .insert(X_PAGE_CACHE, HeaderValue::from_static(value));
}
