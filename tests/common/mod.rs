#![allow(dead_code)]

use axum::Router;
use axum::extract::ConnectInfo;
use axum::http::StatusCode;
use axum_test::TestServer;
use domain_locale::api::middleware::rate_limit::RateLimitLayer;
use domain_locale::domain::SiteConfig;
use domain_locale::domain::site::EditorConfig;
use domain_locale::infrastructure::cache::{CacheService, MemoryCache, NullCache};
use domain_locale::infrastructure::memory::{MemoryContentRepository, MemoryTokenRepository};
use domain_locale::routes::app_router;
use domain_locale::state::AppState;
use domain_locale::utils::token::hash_token;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const EDITOR_TOKEN: &str = "editor-test-token";
pub const EDITOR_ID: &str = "alice";

pub const PRIMARY_HOST: &str = "example.com";
pub const SECONDARY_HOST: &str = "example.ca";

pub fn test_site() -> SiteConfig {
    let mut site = SiteConfig::bundled().unwrap();
    site.editors.push(EditorConfig {
        id: EDITOR_ID.to_string(),
        token_hash: hash_token(SIGNING_SECRET, EDITOR_TOKEN),
    });
    site
}

pub fn create_test_state_with_cache(cache: Arc<dyn CacheService>) -> AppState {
    let site = test_site();
    let content = Arc::new(MemoryContentRepository::new(&site.content));
    let tokens = Arc::new(MemoryTokenRepository::new(&site.editors));

    AppState::new(
        site,
        content.clone(),
        content,
        tokens,
        cache,
        SIGNING_SECRET.to_string(),
    )
    .unwrap()
}

pub fn create_test_state() -> AppState {
    create_test_state_with_cache(Arc::new(NullCache::new()))
}

pub fn create_cached_test_state() -> (AppState, Arc<MemoryCache>) {
    let cache = Arc::new(MemoryCache::new(300));
    (create_test_state_with_cache(cache.clone()), cache)
}

pub fn test_server(state: AppState) -> TestServer {
    test_server_with_rate_limit(state, None)
}

pub fn test_server_with_rate_limit(
    state: AppState,
    rate_limit: Option<RateLimitLayer>,
) -> TestServer {
    let app: Router = app_router(state, rate_limit).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

/// Splits a `Location` into the host to request next and the path with query.
pub fn follow(current_host: &str, location: &str) -> (String, String) {
    match url::Url::parse(location) {
        Ok(url) => {
            let host = url.host_str().unwrap().to_string();
            let path = match url.query() {
                Some(q) => format!("{}?{}", url.path(), q),
                None => url.path().to_string(),
            };
            (host, path)
        }
        Err(_) => (current_host.to_string(), location.to_string()),
    }
}

/// Follows redirects from `host` + `path` and returns the final host and path.
pub async fn resolve_final(
    server: &TestServer,
    host: &str,
    path: &str,
    accept_language: &str,
) -> (String, String) {
    let mut host = host.to_string();
    let mut path = path.to_string();

    for _ in 0..5 {
        let response = server
            .get(&path)
            .add_header("Host", host.as_str())
            .add_header("Accept-Language", accept_language)
            .await;

        if response.status_code() != StatusCode::TEMPORARY_REDIRECT {
            response.assert_status_ok();
            return (host, path);
        }

        let location = response.header("location");
        let (next_host, next_path) = follow(&host, location.to_str().unwrap());
        host = next_host;
        path = next_path;
    }

    panic!("redirect loop for {host}{path}");
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
