use serde::{Deserialize, Serialize};

/// A lesson as declared in the catalog.
///
/// `video_id` is the sensitive field: it never leaves the service except
/// through a resolved guarded token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRecord {
    /// Unique, stable lesson id.
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Display-formatted duration, e.g. `15:30`.
    pub duration: String,
    /// The opaque video identifier handed to the player.
    pub video_id: String,
    /// Thumbnail URL.
    pub thumbnail: String,
}

/// Public projection of a [`LessonRecord`] without the video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub thumbnail: String,
}

impl From<&LessonRecord> for LessonSummary {
    fn from(record: &LessonRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            duration: record.duration.clone(),
            thumbnail: record.thumbnail.clone(),
        }
    }
}
