use std::time::Duration;

use anyhow::Context;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use http::{HeaderValue, Method, header};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{handlers, middleware_layer, state::AppState};

/// Maximum accepted request body size.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// Builds the full application router.
///
/// Lesson routes are served both at the root and under `/api`.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let mut decrypt_routes = Router::new().route("/decrypt", post(handlers::lessons::decrypt));
    if let Some(limit) = &state.config.decrypt_rate_limit {
        decrypt_routes = middleware_layer::rate_limit::rate_limit_by_ip(decrypt_routes, limit)?;
    }

    let lesson_routes = Router::new()
        .route("/lessons", get(handlers::lessons::list_lessons))
        .route(
            "/lessons/{lesson_id}/video",
            get(handlers::lessons::get_lesson_video),
        )
        .merge(decrypt_routes);

    let cors = build_cors(&state.config.cors_allowed_origins)?;

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", lesson_routes.clone())
        .merge(lesson_routes)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true))
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors);

    Ok(app)
}

fn build_cors(allowed_origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins = allowed_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", o))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(86400)))
}
