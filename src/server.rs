//! HTTP server initialization and runtime setup.
//!
//! Loads the site configuration, selects the content store and page cache,
//! and runs the Axum server until shutdown.

use crate::api::middleware::rate_limit;
use crate::config::{Config, PageCacheMode};
use crate::domain::repositories::{EntityRepository, PathAliasRepository, TokenRepository};
use crate::domain::site::SiteConfig;
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::memory::{MemoryContentRepository, MemoryTokenRepository};
use crate::infrastructure::persistence::{PgContentRepository, PgTokenRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

struct Stores {
    entities: Arc<dyn EntityRepository>,
    aliases: Arc<dyn PathAliasRepository>,
    tokens: Arc<dyn TokenRepository>,
}

/// Loads the site configuration named by `SITE_CONFIG`, or the bundled one.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or fails validation.
pub fn load_site(config: &Config) -> Result<SiteConfig> {
    let site = match config.site_config_path {
        Some(ref path) => SiteConfig::from_file(path)
            .with_context(|| format!("Failed to load site configuration {}", path.display()))?,
        None => SiteConfig::bundled().context("Failed to load bundled site configuration")?,
    };
    site.validate().context("Site configuration is invalid")?;
    Ok(site)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Site configuration
/// - PostgreSQL pool and migrations, or in-memory stores seeded from the site
/// - Page cache (Redis, in-memory or disabled)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - The site configuration is invalid
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let site = load_site(&config)?;
    tracing::info!(
        domains = site.domains.len(),
        languages = site.languages.len(),
        "Site configuration loaded"
    );

    let stores = connect_stores(&config, &site).await?;
    let cache = select_cache(&config).await;

    let state = AppState::new(
        site,
        stores.entities,
        stores.aliases,
        stores.tokens,
        cache,
        config.token_signing_secret.clone(),
    )?;

    let rate_limit = rate_limit::layer(config.rate_limit_period_ms, config.rate_limit_burst);
    if rate_limit.is_none() {
        tracing::warn!("Rate limiting disabled");
    }

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state, rate_limit));

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn connect_stores(config: &Config, site: &SiteConfig) -> Result<Stores> {
    let Some(ref database_url) = config.database_url else {
        tracing::info!("No database configured, serving content from the site configuration");
        let content = Arc::new(MemoryContentRepository::new(&site.content));
        return Ok(Stores {
            entities: content.clone(),
            aliases: content,
            tokens: Arc::new(MemoryTokenRepository::new(&site.editors)),
        });
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let pool = Arc::new(pool);
    let content = Arc::new(PgContentRepository::new(pool.clone()));
    Ok(Stores {
        entities: content.clone(),
        aliases: content,
        tokens: Arc::new(PgTokenRepository::new(pool)),
    })
}

async fn select_cache(config: &Config) -> Arc<dyn CacheService> {
    let ttl = config.cache_ttl_seconds;
    match config.page_cache {
        PageCacheMode::Off => {
            tracing::info!("Page cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
        PageCacheMode::Memory => {
            tracing::info!("Page cache enabled (in-memory)");
            Arc::new(MemoryCache::with_max_entries(ttl, config.cache_max_entries))
        }
        PageCacheMode::Auto => match config.redis_url {
            Some(ref redis_url) => match RedisCache::connect(redis_url, ttl).await {
                Ok(redis) => {
                    tracing::info!("Page cache enabled (Redis)");
                    Arc::new(redis)
                }
                Err(e) => {
                    tracing::warn!("Failed to connect to Redis: {}. Using in-memory cache.", e);
                    Arc::new(MemoryCache::with_max_entries(ttl, config.cache_max_entries))
                }
            },
            None => {
                tracing::info!("Page cache enabled (in-memory)");
                Arc::new(MemoryCache::with_max_entries(ttl, config.cache_max_entries))
            }
        },
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down");
}
