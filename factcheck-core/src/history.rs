//! Persisted fact-check history.
//!
//! An ordered list of past results, newest first, serialized as one JSON
//! array under a single storage key. Writes are whole-array, last-write-wins:
//! there is no merging and no conflict detection between concurrent writers.
//! The visible window grows in fixed pages and resets whenever a new result
//! is prepended, so the newest result is always on the first page.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

use crate::error::FactCheckError;
use crate::models::FactCheckResult;

/// Storage key holding the serialized result array.
pub const STORAGE_KEY: &str = "factcheck_results";

/// Number of results revealed per page.
pub const PAGE_SIZE: usize = 5;

// ============================================================================
// Storage abstraction
// ============================================================================

/// String-keyed persistence the history store writes through.
///
/// Injected rather than ambient so tests can substitute [`MemoryStorage`].
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), FactCheckError>;
    fn remove(&mut self, key: &str) -> Result<(), FactCheckError>;
}

/// In-memory storage for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FactCheckError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), FactCheckError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed storage: each key maps to one file under `dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FactCheckError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), FactCheckError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// HistoryStore
// ============================================================================

/// Rolling history of past results with an incrementally revealed window.
#[derive(Debug)]
pub struct HistoryStore<S: Storage> {
    storage: S,
    entries: Vec<FactCheckResult>,
    window: usize,
}

impl<S: Storage> HistoryStore<S> {
    /// Read the persisted history. Missing or unreadable state yields an
    /// empty history; nothing is surfaced to the user beyond a log line.
    pub fn load(storage: S) -> Self {
        let entries = match storage.get(STORAGE_KEY) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable history");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Self {
            storage,
            entries,
            window: PAGE_SIZE,
        }
    }

    /// Prepend a new result, persist the full array, and reset the visible
    /// window to the first page.
    pub fn push_front(&mut self, result: FactCheckResult) -> Result<(), FactCheckError> {
        self.entries.insert(0, result);
        self.window = PAGE_SIZE;
        self.persist()
    }

    fn persist(&mut self) -> Result<(), FactCheckError> {
        let raw = serde_json::to_string(&self.entries)?;
        self.storage.set(STORAGE_KEY, &raw)
    }

    /// The currently visible slice, newest first.
    pub fn visible(&self) -> &[FactCheckResult] {
        let end = self.window.min(self.entries.len());
        &self.entries[..end]
    }

    /// Reveal one more page. Never shrinks the window.
    pub fn load_more(&mut self) {
        self.window = self.window.saturating_add(PAGE_SIZE);
    }

    /// Results beyond the visible window.
    pub fn hidden_count(&self) -> usize {
        self.entries.len().saturating_sub(self.window)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
