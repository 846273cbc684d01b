//! The front door: every request that is not an API or health call.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Redirect, Response},
};

use crate::application::services::Decision;
use crate::domain::entities::{ContentEntity, SwitcherLink};
use crate::domain::{CacheKillSwitch, CurrentUser, RawRequest, RequestContext};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::host::extract_host_from_headers;
use crate::utils::url::parse_query;

/// Page rendered for a served request.
#[derive(Template, WebTemplate)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub langcode: String,
    pub language_name: String,
    pub domain_id: String,
    pub title: String,
    pub links: Vec<SwitcherLink>,
    pub entity: Option<ContentEntity>,
    pub translated: bool,
}

/// Negotiates the language of the request and serves or redirects it.
///
/// # Responses
///
/// - **307 Temporary Redirect**: the request belongs under another prefix or domain
/// - **200 OK**: HTML page with the language switcher
/// - **404 Not Found**: unknown host without a default domain, or no content at the path
///
/// Requests carrying an editor identity (see [`crate::api::middleware::identify`])
/// and bare front-page visits negotiated from the browser language get
/// `Cache-Control: private, no-store`.
pub async fn front_door_handler(
    State(state): State<AppState>,
    req: Request,
) -> Result<Response, AppError> {
    let host = extract_host_from_headers(req.headers())?;

    let mut raw = RawRequest::new(host, req.uri().path())
        .with_query(parse_query(req.uri().query()));
    if let Some(value) = req
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
    {
        raw = raw.with_accept_language(value);
    }
    if let Some(user) = req.extensions().get::<CurrentUser>() {
        raw = raw.with_user(user.clone());
    }
    if let Some(switch) = req.extensions().get::<CacheKillSwitch>() {
        raw = raw.with_kill_switch(switch.clone());
    }

    let ctx = state.context_builder.build(raw).await?;

    let mut response = match state.negotiator.decide(&ctx)? {
        Decision::Redirect { location, .. } => Redirect::temporary(&location).into_response(),
        Decision::Serve { langcode, .. } => render_page(&state, &ctx, &langcode).await?,
    };

    if ctx.caching_disabled() {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("private, no-store"),
        );
    }

    Ok(response)
}

async fn render_page(
    state: &AppState,
    ctx: &RequestContext,
    langcode: &str,
) -> Result<Response, AppError> {
    let entity = state
        .finder
        .find_entity(&ctx.requested_path, ctx.route.as_ref())
        .await;

    if !ctx.is_front_page() && !ctx.is_admin_route && entity.is_none() {
        return Err(AppError::not_found(
            "Page not found",
            serde_json::json!({ "path": ctx.requested_path }),
        ));
    }

    let links = match state.switcher.build_switcher_links(ctx, langcode).await {
        Ok(links) => links.iter().cloned().collect(),
        Err(e) => {
            tracing::error!(
                error = %e,
                langcode = %langcode,
                path = %ctx.requested_path,
                "Failed to build language switcher, rendering without it"
            );
            Vec::new()
        }
    };

    let language_name = state
        .site
        .language(langcode)
        .map_or_else(|| langcode.to_string(), |l| l.name.clone());

    let title = match &entity {
        Some(entity) => entity.label.clone(),
        None if ctx.is_front_page() => ctx.current_domain.id.clone(),
        None => ctx.canonical_path.clone(),
    };

    let page = PageTemplate {
        langcode: langcode.to_string(),
        language_name,
        domain_id: ctx.current_domain.id.clone(),
        title,
        links,
        translated: entity.as_ref().is_some_and(|e| e.has_translation(langcode)),
        entity,
    };

    let mut response = page.into_response();
    if let Ok(value) = HeaderValue::from_str(langcode) {
        response
            .headers_mut()
            .insert(header::CONTENT_LANGUAGE, value);
    }
    Ok(response)
}
