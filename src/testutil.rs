//! Shared test helpers, available to all `#[cfg(test)]` modules in the crate.

use std::net::SocketAddr;

use zeroize::Zeroizing;

use crate::config::Config;
use crate::crypto::guard::IdentifierGuard;
use crate::models::lesson::LessonRecord;
use crate::repositories::lesson::LessonStore;
use crate::state::AppState;

pub const TEST_SECRET: &str = "unit-test-secret";
pub const TEST_VIDEO_ID: &str = "abc123";

/// A minimal `Config` for unit tests: no catalog file, no rate limiting.
pub fn test_config() -> Config {
    Config {
        encryption_secret: Zeroizing::new(TEST_SECRET.to_string()),
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        lessons_file: None,
        cors_allowed_origins: Vec::new(),
        decrypt_rate_limit: None,
    }
}

/// Two lessons: id 1 → `abc123`, id 2 → `def456`.
pub fn test_lessons() -> Vec<LessonRecord> {
    [(1, TEST_VIDEO_ID), (2, "def456")]
        .into_iter()
        .map(|(id, video_id)| LessonRecord {
            id,
            title: format!("Lesson {id}"),
            description: "A test lesson".to_string(),
            duration: "12:34".to_string(),
            video_id: video_id.to_string(),
            thumbnail: format!("https://img.example.com/{id}.jpg"),
        })
        .collect()
}

pub fn test_state() -> AppState {
    let catalog = LessonStore::new(test_lessons()).unwrap();
    AppState::from_parts(test_config(), catalog, IdentifierGuard::from_secret(TEST_SECRET))
}
