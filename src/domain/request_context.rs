//! Per-request snapshot of the facts language negotiation depends on.
//!
//! A [`RequestContext`] is built in two phases: the HTTP layer gathers a
//! [`RawRequest`] (host, path, query, `Accept-Language`, user), then
//! [`crate::application::services::RequestContextBuilder`] derives every other
//! field once, in dependency order. Nothing in the snapshot is mutated after
//! the build except the two write-once slots: the negotiated langcode and the
//! cache kill switch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crate::domain::entities::{Domain, Language};

/// One-way "do not cache this response" latch.
///
/// Clones share the same flag, so the page-cache middleware keeps one handle
/// and the negotiation code pulls the other. There is no reset.
#[derive(Debug, Clone, Default)]
pub struct CacheKillSwitch(Arc<AtomicBool>);

impl CacheKillSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Identity of an authenticated editor, attached to the request by the identify middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
}

/// The route template the canonical path matched, e.g. `/node/{node}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteObject {
    pub path: String,
}

/// Inputs captured from the HTTP request before anything is derived.
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    /// Host without port.
    pub host: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub accept_language: Option<String>,
    pub user: Option<CurrentUser>,
    pub kill_switch: Option<CacheKillSwitch>,
}

impl RawRequest {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_accept_language(mut self, value: impl Into<String>) -> Self {
        self.accept_language = Some(value.into());
        self
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_user(mut self, user: CurrentUser) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_kill_switch(mut self, kill_switch: CacheKillSwitch) -> Self {
        self.kill_switch = Some(kill_switch);
        self
    }
}

#[derive(Debug)]
pub struct RequestContext {
    pub host: String,
    pub current_domain: Domain,
    /// Always a configured, non-neutral langcode.
    pub browser_langcode: String,
    pub browser_domain: Option<Domain>,
    /// Path as requested, always starting with `/`.
    pub requested_path: String,
    /// Non-empty path segments in order.
    pub requested_path_segments: Vec<String>,
    /// First path segment, whether or not it is a known langcode.
    pub requested_langcode: Option<String>,
    pub requested_language: Option<Language>,
    pub query: Vec<(String, String)>,
    /// Requested path without its language prefix (if any).
    pub path_without_langcode: String,
    /// `path_without_langcode` after alias resolution.
    pub canonical_path: String,
    pub route: Option<RouteObject>,
    pub is_admin_route: bool,
    pub current_user_id: Option<String>,
    pub(crate) negotiated_langcode: OnceLock<String>,
    pub(crate) kill_switch: CacheKillSwitch,
}

impl RequestContext {
    /// The bare site root: `/` with no langcode at all.
    pub fn is_bare_front_page(&self) -> bool {
        self.requested_path == "/"
    }

    /// The front page in any language, e.g. `/` or `/fr-ca`.
    pub fn is_front_page(&self) -> bool {
        self.canonical_path == "/"
    }

    /// The path after the first segment, e.g. `/solutions` for `/en/solutions`.
    ///
    /// Empty when the path has at most one segment.
    pub fn path_after_first_segment(&self) -> String {
        match self.requested_path_segments.get(1..) {
            Some(rest) if !rest.is_empty() => format!("/{}", rest.join("/")),
            _ => String::new(),
        }
    }

    /// Records the langcode the negotiator settled on. Later calls are ignored.
    pub fn set_negotiated_langcode(&self, langcode: impl Into<String>) {
        let _ = self.negotiated_langcode.set(langcode.into());
    }

    pub fn negotiated_langcode(&self) -> Option<&str> {
        self.negotiated_langcode.get().map(String::as_str)
    }

    /// Marks the response as non-cacheable for the rest of the request.
    pub fn disable_caching(&self) {
        self.kill_switch.trigger();
    }

    pub fn caching_disabled(&self) -> bool {
        self.kill_switch.is_triggered()
    }

    pub fn kill_switch(&self) -> &CacheKillSwitch {
        &self.kill_switch
    }
}
