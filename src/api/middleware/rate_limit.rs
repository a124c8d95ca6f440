//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Per-IP limiter: one request replenished every `replenish_seconds`, up to `burst`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. Keys come from
/// the socket peer address, so the server must be started with connect info.
pub fn layer(replenish_seconds: u64, burst: u32) -> Option<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(replenish_seconds)
        .burst_size(burst)
        .finish()?;

    Some(GovernorLayer::new(Arc::new(governor_conf)))
}

/// Stricter limiter for credential endpoints (signup, login, email requests).
///
/// One request every 5 seconds, burst of 5.
pub fn auth_layer() -> Option<RateLimitLayer> {
    layer(5, 5)
}
