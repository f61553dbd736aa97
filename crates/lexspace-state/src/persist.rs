#![forbid(unsafe_code)]

//! Pluggable storage backends for layout snapshots.
//!
//! # Design Invariants
//!
//! 1. **Graceful degradation**: storage failures never panic; operations
//!    return `Result` and the store treats failures as best-effort.
//! 2. **Atomic writes**: file storage uses a write-then-rename pattern so
//!    a crash mid-save never leaves a corrupt file behind.
//! 3. **Absent is not an error**: a missing file or empty backend loads
//!    as `Ok(None)`; the caller substitutes defaults.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StorageError::Io` | File I/O failure | Returned; in-memory state unaffected |
//! | `StorageError::Serialization` | JSON encode/decode | Returned; caller falls back to defaults |
//! | Missing file | First run | `load` returns `Ok(None)` |

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::snapshot::LayoutSnapshot;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from snapshot storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// JSON encode/decode failure.
    Serialization(String),
    /// Internal lock poisoned by a panicking writer.
    Poisoned,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Serialization(msg) => write!(f, "serialization error: {msg}"),
            Self::Poisoned => f.write_str("storage lock poisoned"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialization(_) | Self::Poisoned => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// ---------------------------------------------------------------------------
// Backend trait
// ---------------------------------------------------------------------------

/// A durable home for the workspace layout snapshot.
///
/// Implementations are `Send + Sync` so a backend handle can be shared
/// between the store and test harnesses.
pub trait StorageBackend: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Load the stored snapshot. `Ok(None)` means nothing was saved yet.
    fn load(&self) -> StorageResult<Option<LayoutSnapshot>>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &LayoutSnapshot) -> StorageResult<()>;

    /// Remove any stored snapshot.
    fn clear(&self) -> StorageResult<()>;
}

// ---------------------------------------------------------------------------
// Memory storage
// ---------------------------------------------------------------------------

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<Option<LayoutSnapshot>>,
}

impl MemoryStorage {
    /// Empty memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Memory storage pre-populated with a snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: LayoutSnapshot) -> Self {
        Self {
            data: RwLock::new(Some(snapshot)),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "MemoryStorage"
    }

    fn load(&self) -> StorageResult<Option<LayoutSnapshot>> {
        let guard = self.data.read().map_err(|_| StorageError::Poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &LayoutSnapshot) -> StorageResult<()> {
        let mut guard = self.data.write().map_err(|_| StorageError::Poisoned)?;
        *guard = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        let mut guard = self.data.write().map_err(|_| StorageError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}

impl fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let populated = self.data.read().map(|g| g.is_some()).unwrap_or(false);
        f.debug_struct("MemoryStorage")
            .field("populated", &populated)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// File storage
// ---------------------------------------------------------------------------

/// JSON-file backend with atomic write-then-rename saves.
///
/// # File Format
///
/// ```json
/// {
///   "schema_version": 1,
///   "widths": { "document": 45.0, "insights": 30.0, "qa": 25.0 },
///   "minimized": ["qa"]
/// }
/// ```
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage at an explicit path. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Storage at the default per-application location:
    /// `$XDG_STATE_HOME/lexspace/{app_name}/layout.json`, falling back to
    /// `~/.local/state` and finally the current directory.
    #[must_use]
    pub fn default_for_app(app_name: &str) -> Self {
        let base = state_dir_or_fallback();
        Self {
            path: base.join("lexspace").join(app_name).join("layout.json"),
        }
    }

    /// The path this backend reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tmp
    }
}

fn state_dir_or_fallback() -> PathBuf {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(state_home);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("state");
    }
    PathBuf::from(".")
}

impl StorageBackend for FileStorage {
    fn name(&self) -> &str {
        "FileStorage"
    }

    fn load(&self) -> StorageResult<Option<LayoutSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let snapshot: LayoutSnapshot = serde_json::from_reader(reader)
            .map_err(|e| StorageError::Serialization(format!("failed to parse layout file: {e}")))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &LayoutSnapshot) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to a sibling temp file, sync, then rename over the target.
        let tmp = self.temp_path();
        {
            let file = File::create(&tmp)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, snapshot)
                .map_err(|e| StorageError::Serialization(format!("failed to encode layout: {e}")))?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl fmt::Debug for FileStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStorage")
            .field("path", &self.path)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lexspace_core::PanelId;
    use lexspace_layout::PanelWidths;
    use std::collections::BTreeSet;

    fn sample_snapshot() -> LayoutSnapshot {
        let mut minimized = BTreeSet::new();
        minimized.insert(PanelId::Insights);
        LayoutSnapshot::capture(
            &PanelWidths::from_entries([
                (PanelId::Document, 50.0),
                (PanelId::Insights, 25.0),
                (PanelId::Qa, 25.0),
            ]),
            &minimized,
        )
    }

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());

        let snap = sample_snapshot();
        storage.save(&snap).unwrap();
        assert_eq!(storage.load().unwrap(), Some(snap));

        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn memory_storage_prepopulated() {
        let snap = sample_snapshot();
        let storage = MemoryStorage::with_snapshot(snap.clone());
        assert_eq!(storage.load().unwrap(), Some(snap));
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("layout.json"));
        assert!(storage.load().unwrap().is_none());

        let snap = sample_snapshot();
        storage.save(&snap).unwrap();
        assert_eq!(storage.load().unwrap(), Some(snap));

        // Temp file must not linger after a successful save.
        assert!(!storage.temp_path().exists());
    }

    #[test]
    fn file_storage_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("deep/nested/layout.json"));
        storage.save(&sample_snapshot()).unwrap();
        assert!(storage.path().exists());
    }

    #[test]
    fn file_storage_corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(&path, "{definitely not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.load(),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn file_storage_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("layout.json"));
        storage.clear().unwrap();
        storage.save(&sample_snapshot()).unwrap();
        storage.clear().unwrap();
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn error_display() {
        let err = StorageError::Serialization("bad".into());
        assert!(format!("{err}").contains("bad"));
        let io: StorageError = std::io::Error::other("disk").into();
        assert!(format!("{io}").contains("disk"));
    }
}
