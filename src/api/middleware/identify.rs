//! Optional editor identification for front-door requests.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::state::AppState;

/// Attaches the editor behind a valid bearer token, if any.
///
/// Anonymous requests and invalid tokens pass through untouched: the front
/// door never rejects a visitor, it only stops caching pages for editors.
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    if let Ok(AuthBearer(token)) = AuthBearer::from_request_parts(&mut parts, &()).await {
        match st.auth_service.authenticate(&token).await {
            Ok(user) => {
                parts.extensions.insert(user);
            }
            Err(e) => tracing::debug!(error = %e, "Ignoring invalid bearer token"),
        }
    }

    next.run(Request::from_parts(parts, body)).await
}
