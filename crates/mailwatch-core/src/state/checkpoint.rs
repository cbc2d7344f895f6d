//! Checkpoint persistence.
//!
//! The checkpoint is a single epoch-second watermark: messages dated at or
//! before it are considered already processed. Reads fail soft (any
//! problem resolves to "no checkpoint" and the cold-start policy); writes
//! are atomic so a torn write can never corrupt the next read.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::warn;

use crate::Result;

/// Storage for the "last processed" watermark.
///
/// Backed by a plain-text file in production ([`FileCheckpointStore`]) and
/// by memory in tests ([`MemoryCheckpointStore`]); the seam keeps a future
/// database swap contained.
pub trait CheckpointStore {
    /// Reads the checkpoint, resolving missing or malformed state to
    /// `None` rather than an error.
    ///
    /// # Errors
    ///
    /// Implementations may fail on genuinely unexpected storage faults;
    /// the file-backed store never does.
    fn read(&self) -> Result<Option<i64>>;

    /// Persists a new checkpoint value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be durably stored.
    fn write(&mut self, epoch: i64) -> Result<()>;
}

/// Checkpoint stored as a single decimal line in a plain-text file.
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    /// Creates a store backed by the given file path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn read(&self) -> Result<Option<i64>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable checkpoint, treating as absent");
                return Ok(None);
            }
        };
        match raw.trim().parse::<i64>() {
            Ok(epoch) if epoch > 0 => Ok(Some(epoch)),
            Ok(_) => Ok(None),
            Err(_) => {
                if !raw.trim().is_empty() {
                    warn!(path = %self.path.display(), "malformed checkpoint, treating as absent");
                }
                Ok(None)
            }
        }
    }

    fn write(&mut self, epoch: i64) -> Result<()> {
        let parent = self.path.parent().map(std::path::Path::to_path_buf);
        let dir = match parent {
            Some(dir) => {
                fs::create_dir_all(&dir)?;
                dir
            }
            None => PathBuf::from("."),
        };
        // Write-then-rename keeps the previous value intact on crash.
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        writeln!(tmp, "{epoch}")?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-memory checkpoint store for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryCheckpointStore {
    value: Option<i64>,
}

impl MemoryCheckpointStore {
    /// Creates an empty store (no checkpoint yet).
    #[must_use]
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// Creates a store seeded with a checkpoint.
    #[must_use]
    pub const fn with_value(epoch: i64) -> Self {
        Self { value: Some(epoch) }
    }

    /// The current value, for assertions.
    #[must_use]
    pub const fn value(&self) -> Option<i64> {
        self.value
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn read(&self) -> Result<Option<i64>> {
        Ok(self.value)
    }

    fn write(&mut self, epoch: i64) -> Result<()> {
        self.value = Some(epoch);
        Ok(())
    }
}
