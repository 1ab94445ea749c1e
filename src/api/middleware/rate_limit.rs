//! Per-client rate limiting using a token bucket.
//!
//! Every scrape costs an outbound page load (and, with the browser backend, a
//! Chrome process), so the API bucket is kept small.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

type IpRateLimit =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Rate limiter for the form page.
///
/// # Limits
///
/// - **Replenish**: one request per second
/// - **Burst**: 30 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer() -> IpRateLimit {
    bucket(1, 30)
}

/// Rate limiter for `POST /api/scrape`.
///
/// # Limits
///
/// - **Replenish**: one request every 2 seconds
/// - **Burst**: 10 requests
///
/// # Key Extraction
///
/// Limits apply per client IP taken from the socket peer address, so the
/// server must be started with connect info (see [`crate::server::run`]).
pub fn scrape_layer() -> IpRateLimit {
    bucket(2, 10)
}

fn bucket(replenish_seconds: u64, burst: u32) -> IpRateLimit {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(replenish_seconds)
            .burst_size(burst)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
