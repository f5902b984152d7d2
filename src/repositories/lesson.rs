use std::collections::HashSet;
use std::path::Path;

use subtle::{Choice, ConstantTimeEq};

use crate::error::{AppError, Result};
use crate::models::lesson::{LessonRecord, LessonSummary};

/// Read-only, in-memory lesson catalog.
///
/// Built once at startup; nothing mutates it afterwards.
#[derive(Debug)]
pub struct LessonStore {
    lessons: Vec<LessonRecord>,
    video_ids: Vec<String>,
}

impl LessonStore {
    /// Creates a store from records, keeping their declaration order.
    ///
    /// Rejects an empty catalog, duplicate lesson ids and empty video ids.
    pub fn new(lessons: Vec<LessonRecord>) -> Result<Self> {
        if lessons.is_empty() {
            return Err(AppError::Catalog("Lesson catalog is empty".to_string()));
        }

        let mut seen_ids = HashSet::with_capacity(lessons.len());
        let mut video_ids: Vec<String> = Vec::with_capacity(lessons.len());

        for lesson in &lessons {
            if !seen_ids.insert(lesson.id) {
                return Err(AppError::Catalog(format!("Duplicate lesson id {}", lesson.id)));
            }
            if lesson.video_id.trim().is_empty() {
                return Err(AppError::Catalog(format!(
                    "Lesson {} has an empty videoId",
                    lesson.id
                )));
            }
            if !video_ids.contains(&lesson.video_id) {
                video_ids.push(lesson.video_id.clone());
            }
        }

        Ok(Self { lessons, video_ids })
    }

    /// Loads the catalog from a JSON file, or the built-in catalog when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let bytes = std::fs::read(path)?;
                let lessons: Vec<LessonRecord> = sonic_rs::from_slice(&bytes).map_err(|e| {
                    AppError::Catalog(format!("Invalid catalog file {}: {}", path.display(), e))
                })?;
                tracing::info!("📚 Loaded {} lessons from {}", lessons.len(), path.display());
                Self::new(lessons)
            }
            None => {
                tracing::info!("📚 Using built-in lesson catalog");
                Self::new(builtin_lessons())
            }
        }
    }

    /// Returns every lesson without its video id, in declaration order.
    pub fn list(&self) -> Vec<LessonSummary> {
        self.lessons.iter().map(LessonSummary::from).collect()
    }

    /// Finds a lesson by exact id.
    pub fn find_by_id(&self, id: i64) -> Option<&LessonRecord> {
        self.lessons.iter().find(|lesson| lesson.id == id)
    }

    /// Whether `candidate` is the video id of some lesson.
    ///
    /// Compares against every known id in constant time per id and never
    /// exits early, so timing does not reveal which lesson matched.
    pub fn contains_video_id(&self, candidate: &str) -> bool {
        let candidate = candidate.as_bytes();
        let found = self
            .video_ids
            .iter()
            .fold(Choice::from(0u8), |found, known| {
                found | known.as_bytes().ct_eq(candidate)
            });
        found.into()
    }

    /// Number of lessons in the catalog.
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

fn lesson(id: i64, duration: &str) -> LessonRecord {
    LessonRecord {
        id,
        title: "Umar M Shareef".to_string(),
        description: "Upload By Bashir Yusuf AS An Assiagnment".to_string(),
        duration: duration.to_string(),
        video_id: "stwTyIy6Ae4".to_string(),
        thumbnail: "https://img.youtube.com/vi/stwTyIy6Ae4/maxresdefault.jpg".to_string(),
    }
}

/// The catalog served when no `LESSONS_FILE` is configured.
pub fn builtin_lessons() -> Vec<LessonRecord> {
    vec![lesson(1, "15:30"), lesson(2, "22:45"), lesson(3, "18:20")]
}
