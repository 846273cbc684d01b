//! Per-client rate limiting using the token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter keyed by the client's socket peer address.
///
/// # Limits
///
/// - **Replenish**: one request every `period_ms` milliseconds
/// - **Burst**: `burst` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`. Returns
/// `None` when either value is zero.
///
/// The router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()` for the peer address
/// to be available.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .fallback(front_door_handler)
///     .layer(rate_limit::layer(50, 100).unwrap());
/// ```
pub fn layer(period_ms: u64, burst: u32) -> Option<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(period_ms)
        .burst_size(burst)
        .finish()?;

    Some(GovernorLayer::new(Arc::new(governor_conf)))
}
