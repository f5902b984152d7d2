use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use crate::{
    error::{AppError, Result},
    models::token::DecryptRequest,
    response,
    services::lessons as lesson_service,
    state::AppState,
};

/// Lists all lessons without their video ids.
#[axum::debug_handler]
pub async fn list_lessons(State(state): State<AppState>) -> Result<Response> {
    let lessons = lesson_service::list_lessons(&state);
    response::json(StatusCode::OK, &lessons)
}

/// Parses a path segment as a lesson id.
///
/// Only an optional `-` followed by ASCII digits is accepted: no whitespace,
/// no leading `+`.
fn parse_lesson_id(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Issues a guarded token for a lesson's video.
///
/// A non-numeric id is an unknown lesson, not a malformed request.
#[axum::debug_handler]
pub async fn get_lesson_video(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
) -> Result<Response> {
    let lesson_id = parse_lesson_id(&lesson_id).ok_or(AppError::NotFound)?;
    let descriptor = lesson_service::get_guarded_video(&state, lesson_id)?;
    response::json(StatusCode::OK, &descriptor)
}

/// Resolves a guarded token to its video id.
///
/// The body is parsed leniently: anything that does not yield a token is
/// reported as a missing token.
#[axum::debug_handler]
pub async fn decrypt(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let request: DecryptRequest = sonic_rs::from_slice(&body).unwrap_or_else(|e| {
        tracing::debug!("Unparsable decrypt body: {}", e);
        DecryptRequest::default()
    });

    let resolution = lesson_service::resolve_token(&state, request.token.as_deref())?;
    response::json(StatusCode::OK, &resolution)
}
