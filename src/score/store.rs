//! Score store implementations.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::record::{BestRecord, ScoreError};

/// Loads and saves the best record.
///
/// Implementations report failures; deciding whether a failure matters is
/// up to the caller.
pub trait ScoreStore {
    /// Load the stored record. A missing record reads as the default.
    fn read_best(&self) -> Result<BestRecord, ScoreError>;

    /// Replace the stored record.
    fn write_best(&mut self, record: &BestRecord) -> Result<(), ScoreError>;

    /// Delete the stored record so later reads return the default.
    fn reset(&mut self) -> Result<(), ScoreError>;
}

/// Two-line text file on disk.
///
/// ```no_run
/// use tile_merge::score::{BestRecord, FileScoreStore, ScoreStore};
///
/// let mut store = FileScoreStore::new("score.txt");
/// store.write_best(&BestRecord::new(2048, 95.2))?;
/// assert_eq!(store.read_best()?.best_score, 2048);
/// # Ok::<(), tile_merge::score::ScoreError>(())
/// ```
#[derive(Clone, Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the record file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn read_best(&self) -> Result<BestRecord, ScoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => BestRecord::parse(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BestRecord::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_best(&mut self, record: &BestRecord) -> Result<(), ScoreError> {
        std::fs::write(&self.path, record.to_text())?;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), ScoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("deleted score record {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store.
///
/// Clones share the same record, so a caller can keep a handle to inspect
/// what a session wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryScoreStore {
    record: Arc<Mutex<Option<BestRecord>>>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `record`.
    #[must_use]
    pub fn with_record(record: BestRecord) -> Self {
        Self {
            record: Arc::new(Mutex::new(Some(record))),
        }
    }

    /// The stored record, if one was written.
    #[must_use]
    pub fn stored(&self) -> Option<BestRecord> {
        *self.record.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set(&self, record: Option<BestRecord>) {
        *self.record.lock().unwrap_or_else(|e| e.into_inner()) = record;
    }
}

impl ScoreStore for MemoryScoreStore {
    fn read_best(&self) -> Result<BestRecord, ScoreError> {
        Ok(self.stored().unwrap_or_default())
    }

    fn write_best(&mut self, record: &BestRecord) -> Result<(), ScoreError> {
        self.set(Some(*record));
        Ok(())
    }

    fn reset(&mut self) -> Result<(), ScoreError> {
        self.set(None);
        Ok(())
    }
}
