use std::sync::Arc;

use crate::config::Config;
use crate::crypto::guard::IdentifierGuard;
use crate::error::Result;
use crate::repositories::lesson::LessonStore;

/// The application's state.
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<Config>,
    /// The lesson catalog.
    pub catalog: Arc<LessonStore>,
    /// The identifier guard holding the derived key.
    pub guard: Arc<IdentifierGuard>,
}

impl AppState {
    /// Creates a new `AppState`, loading the catalog and deriving the key.
    pub fn new(config: &Config) -> Result<Self> {
        let catalog = LessonStore::load(config.lessons_file.as_deref())?;
        tracing::info!("✅ Lesson catalog initialized ({} lessons)", catalog.len());

        let guard = IdentifierGuard::from_secret(&config.encryption_secret);
        tracing::info!("✅ Identifier guard initialized");

        Ok(Self::from_parts(config.clone(), catalog, guard))
    }

    /// Assembles state from already-built parts.
    pub fn from_parts(config: Config, catalog: LessonStore, guard: IdentifierGuard) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            guard: Arc::new(guard),
        }
    }
}
