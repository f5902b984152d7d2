use axum::{http::StatusCode, response::Response};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::{error::Result, response};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

/// Liveness probe.
pub async fn health() -> Result<Response> {
    response::json(
        StatusCode::OK,
        &HealthResponse {
            status: "ok",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        },
    )
}
