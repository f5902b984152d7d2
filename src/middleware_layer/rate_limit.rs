use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};

use crate::config::RateLimitConfig;
use crate::state::AppState;

/// How often stale per-IP rate limit entries are dropped.
const LIMITER_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Wraps `routes` in a per-peer-IP rate limit.
///
/// The peer address comes from `ConnectInfo<SocketAddr>`, so the router must
/// be served with `into_make_service_with_connect_info`. Rejected requests get
/// a 429 with `x-ratelimit-*` headers.
///
/// Spawns the limiter's cleanup task, so it must be called inside a Tokio
/// runtime.
///
/// # Arguments
///
/// * `routes` - The routes to protect.
/// * `limit` - Burst size and replenish interval.
///
/// # Returns
///
/// The wrapped routes, or an error if the limit cannot be built.
pub fn rate_limit_by_ip(
    routes: Router<AppState>,
    limit: &RateLimitConfig,
) -> anyhow::Result<Router<AppState>> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(limit.replenish_ms)
            .burst_size(limit.burst_size)
            .use_headers()
            .finish()
            .context("Invalid rate limit configuration")?,
    );

    let limiter = governor_conf.limiter().clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(LIMITER_CLEANUP_INTERVAL).await;
            tracing::debug!("🧹 Rate limiting storage size: {}", limiter.len());
            limiter.retain_recent();
        }
    });

    tracing::info!(
        "✅ Rate limit enabled (burst {}, one request per {}ms)",
        limit.burst_size,
        limit.replenish_ms
    );

    Ok(routes.layer(GovernorLayer::new(governor_conf)))
}
