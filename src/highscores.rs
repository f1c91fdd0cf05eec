//! Best-score persistence
//!
//! The engine only ever stores one number. It reads it once at startup and
//! writes it when a run beats it. Storage is best-effort: callers log
//! failures and carry on.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why the high score could not be read or written
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("high score storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored high score is malformed: {0}")]
    Format(#[from] serde_json::Error),
    #[error("high score storage unavailable: {0}")]
    Unavailable(&'static str),
}

/// Key-value slot holding the best score
pub trait HighScoreStore {
    /// `Ok(None)` when nothing has been stored yet
    fn load_high_score(&mut self) -> Result<Option<f32>, PersistenceError>;
    fn save_high_score(&mut self, score: f32) -> Result<(), PersistenceError>;
}

/// In-memory store (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<f32>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded with an existing best score
    pub fn with_value(score: f32) -> Self {
        Self {
            value: Some(score),
            writes: 0,
        }
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&mut self) -> Result<Option<f32>, PersistenceError> {
        Ok(self.value)
    }

    fn save_high_score(&mut self, score: f32) -> Result<(), PersistenceError> {
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }
}

/// On-disk layout of the native store
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Serialize, Deserialize)]
struct StoredHighScore {
    high_score: f32,
}

/// JSON file store (native)
///
/// Writes go to a sibling temp file first and are renamed over the target.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for JsonFileStore {
    fn load_high_score(&mut self) -> Result<Option<f32>, PersistenceError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredHighScore = serde_json::from_str(&json)?;
        log::info!("Loaded high score {} from {}", stored.high_score, self.path.display());
        Ok(Some(stored.high_score))
    }

    fn save_high_score(&mut self, score: f32) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(&StoredHighScore { high_score: score })?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "doodleHighScore";

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable("no localStorage"))
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load_high_score(&mut self) -> Result<Option<f32>, PersistenceError> {
        let storage = Self::storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => Ok(Some(serde_json::from_str::<f32>(&raw)?)),
            Ok(None) => Ok(None),
            Err(_) => Err(PersistenceError::Unavailable("localStorage read rejected")),
        }
    }

    fn save_high_score(&mut self, score: f32) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        storage
            .set_item(Self::STORAGE_KEY, &score.to_string())
            .map_err(|_| PersistenceError::Unavailable("localStorage write rejected"))?;
        log::info!("High score saved ({score})");
        Ok(())
    }
}
