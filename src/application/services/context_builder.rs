//! Two-phase construction of the per-request negotiation snapshot.

use std::sync::{Arc, OnceLock};

use crate::application::services::{DomainResolver, LanguageManager, RouteMatcher};
use crate::domain::repositories::PathAliasRepository;
use crate::domain::request_context::{RawRequest, RequestContext};
use crate::domain::site::SiteConfig;
use crate::error::NegotiationError;
use crate::utils::url::{join_segments, path_segments};

/// Derives a [`RequestContext`] from a [`RawRequest`].
///
/// Fields are computed once, in dependency order: domain, browser language,
/// path data, alias resolution, route, then the user-driven cache decision.
pub struct RequestContextBuilder {
    site: Arc<SiteConfig>,
    languages: Arc<LanguageManager>,
    domains: Arc<DomainResolver>,
    routes: Arc<RouteMatcher>,
    aliases: Arc<dyn PathAliasRepository>,
}

impl RequestContextBuilder {
    pub fn new(
        site: Arc<SiteConfig>,
        languages: Arc<LanguageManager>,
        domains: Arc<DomainResolver>,
        routes: Arc<RouteMatcher>,
        aliases: Arc<dyn PathAliasRepository>,
    ) -> Self {
        Self {
            site,
            languages,
            domains,
            routes,
            aliases,
        }
    }

    /// Builds the snapshot for one request.
    ///
    /// A path without a route is not an error: the context simply carries no
    /// route object. An authenticated user triggers the kill switch here.
    ///
    /// # Errors
    ///
    /// Returns [`NegotiationError::UnknownDomain`] when the host maps to no
    /// domain and no default domain exists.
    pub async fn build(&self, raw: RawRequest) -> Result<RequestContext, NegotiationError> {
        let current_domain = self.domains.active_domain(&raw.host)?.clone();

        let browser_langcode = self
            .languages
            .browser_langcode(raw.accept_language.as_deref());
        let browser_domain = self.domains.domain_for_langcode(&browser_langcode).cloned();

        let requested_path = if raw.path.starts_with('/') {
            raw.path
        } else {
            format!("/{}", raw.path)
        };
        let requested_path_segments = path_segments(&requested_path);
        let requested_langcode = requested_path_segments.first().cloned();
        let requested_language = requested_langcode
            .as_deref()
            .and_then(|code| self.languages.language_for_prefix(code))
            .cloned();

        let strips_prefix = requested_language.is_some()
            || requested_langcode
                .as_ref()
                .is_some_and(|code| self.site.prefix_aliases.contains_key(code));
        let path_without_langcode = if strips_prefix {
            join_segments(&requested_path_segments[1..])
        } else {
            join_segments(&requested_path_segments)
        };

        let canonical_path = match self.aliases.resolve(&path_without_langcode).await {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(error = %e, path = %path_without_langcode, "Alias lookup failed");
                path_without_langcode.clone()
            }
        };

        let route = self.routes.match_route(&canonical_path);
        let is_admin_route = self.routes.is_admin_route(&canonical_path);

        let kill_switch = raw.kill_switch.unwrap_or_default();
        let current_user_id = raw.user.map(|user| user.id);
        if current_user_id.is_some() {
            kill_switch.trigger();
        }

        Ok(RequestContext {
            host: raw.host,
            current_domain,
            browser_langcode,
            browser_domain,
            requested_path,
            requested_path_segments,
            requested_langcode,
            requested_language,
            query: raw.query,
            path_without_langcode,
            canonical_path,
            route,
            is_admin_route,
            current_user_id,
            negotiated_langcode: OnceLock::new(),
            kill_switch,
        })
    }
}
