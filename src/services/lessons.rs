use crate::{
    error::{AppError, Result},
    models::{
        lesson::LessonSummary,
        token::{GuardedDescriptor, VideoResolution},
    },
    state::AppState,
};

/// Lists every lesson without its video id.
///
/// # Arguments
///
/// * `state` - The application state.
///
/// # Returns
///
/// The lesson summaries in catalog order.
pub fn list_lessons(state: &AppState) -> Vec<LessonSummary> {
    state.catalog.list()
}

/// Issues a guarded descriptor for a lesson's video.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `lesson_id` - The lesson id, matched exactly.
///
/// # Returns
///
/// `AppError::NotFound` when no lesson has `lesson_id`.
pub fn get_guarded_video(state: &AppState, lesson_id: i64) -> Result<GuardedDescriptor> {
    let lesson = state
        .catalog
        .find_by_id(lesson_id)
        .ok_or(AppError::NotFound)?;

    let descriptor = state.guard.issue_descriptor(&lesson.video_id)?;
    tracing::debug!("🔐 Issued guarded token for lesson {}", lesson_id);
    Ok(descriptor)
}

/// Resolves a guarded token back to its video id.
///
/// Every decryption failure collapses into the same `Invalid token` answer;
/// the reason is only logged. A token that decrypts but is not a catalog
/// video id is rejected as unauthorized.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `token` - The token from the request body, if any. Passed to the guard
///   as-is; whitespace only matters for the emptiness check.
///
/// # Returns
///
/// The resolved `VideoResolution`, `AppError::BadRequest` for a missing or
/// invalid token, or `AppError::Unauthorized` for an unknown video.
pub fn resolve_token(state: &AppState, token: Option<&str>) -> Result<VideoResolution> {
    let token = token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing token".to_string()))?;

    let video_id = state.guard.decrypt(token).map_err(|e| {
        tracing::debug!("❌ Rejected token: {}", e);
        AppError::BadRequest("Invalid token".to_string())
    })?;

    if !state.catalog.contains_video_id(&video_id) {
        return Err(AppError::Unauthorized(
            "Token does not correspond to a known video".to_string(),
        ));
    }

    Ok(VideoResolution { video_id })
}
