//! Handlers for the editorial option-filtering endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::editorial::{
    DomainOptionsRequest, DomainOptionsResponse, LanguageOptionsRequest,
    LanguageOptionsResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Filters the language options of a content form.
///
/// # Endpoint
///
/// `POST /api/editorial/{langcode}/language-options`
///
/// # Request Body
///
/// ```json
/// { "options": [{ "value": "en-us", "label": "English (US)" }, { "value": "und" }] }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: unknown langcode or empty option list
/// - **401 Unauthorized**: missing or invalid editor token
pub async fn language_options_handler(
    State(state): State<AppState>,
    Path(langcode): Path<String>,
    Json(payload): Json<LanguageOptionsRequest>,
) -> Result<Json<LanguageOptionsResponse>, AppError> {
    payload.validate()?;
    ensure_language(&state, &langcode)?;

    let options = state
        .editorial
        .filter_language_options(&langcode, payload.options)?;

    Ok(Json(LanguageOptionsResponse { langcode, options }))
}

/// Filters the domain-access options of a content form.
///
/// # Endpoint
///
/// `POST /api/editorial/{langcode}/domain-options`
///
/// # Request Body
///
/// ```json
/// {
///   "request_path": "/en-ca/node/add/page",
///   "is_new": true,
///   "options": [{ "value": "domain_one" }, { "value": "domain_two" }]
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "langcode": "en-ca",
///   "options": [{ "value": "domain_two", "label": "" }],
///   "default_value": ["domain_two"],
///   "source_default": ["domain_two"],
///   "all_affiliates_visible": false
/// }
/// ```
pub async fn domain_options_handler(
    State(state): State<AppState>,
    Path(langcode): Path<String>,
    Json(payload): Json<DomainOptionsRequest>,
) -> Result<Json<DomainOptionsResponse>, AppError> {
    payload.validate()?;
    ensure_language(&state, &langcode)?;

    let widget = state.editorial.filter_domain_options(
        &langcode,
        &payload.request_path,
        payload.is_new,
        payload.options,
    )?;

    Ok(Json(DomainOptionsResponse { langcode, widget }))
}

fn ensure_language(state: &AppState, langcode: &str) -> Result<(), AppError> {
    match state.site.language(langcode) {
        Some(language) if !language.is_neutral() => Ok(()),
        _ => Err(AppError::bad_request(
            "Unknown langcode",
            serde_json::json!({ "langcode": langcode }),
        )),
    }
}
