//! Bounded, order-preserving cache of recently seen message signatures.
//!
//! One signature per line, oldest first. The cache is what suppresses
//! duplicate notifications when push events fire more than once for the
//! same message, even across process restarts.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::warn;

use crate::Result;
use crate::message::Signature;

/// Storage for the recently-seen signature sequence.
pub trait SignatureCache {
    /// Loads the cached sequence, oldest first. Missing or unreadable
    /// state loads as empty.
    ///
    /// # Errors
    ///
    /// Implementations may fail on genuinely unexpected storage faults;
    /// the file-backed cache never does.
    fn load(&self) -> Result<Vec<String>>;

    /// Persists the sequence, retaining only the newest `capacity`
    /// entries (oldest evicted first). Empty strings are never stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence cannot be durably stored.
    fn save(&mut self, signatures: Vec<String>, capacity: usize) -> Result<()>;
}

/// Appends newly observed signatures to the cached sequence, keeping the
/// sequence an order-preserving set (first occurrence wins).
#[must_use]
pub fn merge_observed(mut cached: Vec<String>, observed: &[Signature]) -> Vec<String> {
    let mut present: HashSet<&str> = cached.iter().map(String::as_str).collect();
    let mut fresh = Vec::new();
    for sig in observed {
        if !sig.as_str().is_empty() && present.insert(sig.as_str()) {
            fresh.push(sig.as_str().to_owned());
        }
    }
    cached.extend(fresh);
    cached
}

/// Drops the oldest entries until the sequence fits the capacity.
#[must_use]
pub fn retain_newest(mut signatures: Vec<String>, capacity: usize) -> Vec<String> {
    if signatures.len() > capacity {
        signatures.drain(..signatures.len() - capacity);
    }
    signatures
}

/// Signature cache stored as a line-oriented plain-text file.
#[derive(Debug, Clone)]
pub struct FileSignatureCache {
    path: PathBuf,
}

impl FileSignatureCache {
    /// Creates a cache backed by the given file path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SignatureCache for FileSignatureCache {
    fn load(&self) -> Result<Vec<String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable signature cache, treating as empty");
                return Ok(Vec::new());
            }
        };
        Ok(raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect())
    }

    fn save(&mut self, signatures: Vec<String>, capacity: usize) -> Result<()> {
        let kept = retain_newest(
            signatures.into_iter().filter(|s| !s.is_empty()).collect(),
            capacity,
        );
        let parent = self.path.parent().map(std::path::Path::to_path_buf);
        let dir = match parent {
            Some(dir) => {
                fs::create_dir_all(&dir)?;
                dir
            }
            None => PathBuf::from("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        for sig in &kept {
            writeln!(tmp, "{sig}")?;
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-memory signature cache for tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySignatureCache {
    entries: Vec<String>,
}

impl MemorySignatureCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a cache seeded with signatures, oldest first.
    #[must_use]
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// The stored sequence, for assertions.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl SignatureCache for MemorySignatureCache {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, signatures: Vec<String>, capacity: usize) -> Result<()> {
        self.entries = retain_newest(
            signatures.into_iter().filter(|s| !s.is_empty()).collect(),
            capacity,
        );
        Ok(())
    }
}
