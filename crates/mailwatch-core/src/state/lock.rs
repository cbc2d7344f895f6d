//! Exclusive per-account run lock.
//!
//! An advisory OS file lock scoped to one checkpoint/signature-cache
//! pair. Acquisition blocks until any in-progress run for the same
//! account finishes, which linearizes overlapping invocations triggered
//! by duplicate push events. The OS releases the lock on process exit,
//! normal or not, so a crashed holder never wedges later runs.

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;

use fs2::FileExt;
use tracing::debug;

use crate::Result;

/// Handle for the per-account advisory lock file.
#[derive(Debug, Clone)]
pub struct RunLock {
    path: PathBuf,
}

impl RunLock {
    /// Creates a lock handle for the given lock file path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Acquires the lock, blocking until it is free.
    ///
    /// The returned guard holds the lock for its lifetime and releases it
    /// on drop, on every exit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock file cannot be created or the OS lock
    /// call fails (contention is not an error; it blocks).
    pub fn acquire(&self) -> Result<RunLockGuard> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&self.path)?;
        file.lock_exclusive()?;
        debug!(path = %self.path.display(), "run lock acquired");
        Ok(RunLockGuard { file })
    }
}

/// Scoped guard for an acquired run lock.
#[must_use = "dropping the guard releases the lock"]
#[derive(Debug)]
pub struct RunLockGuard {
    file: File,
}

impl Drop for RunLockGuard {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
