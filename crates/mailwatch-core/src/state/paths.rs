//! Per-account layout of the on-disk state artifacts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Locations of the checkpoint, signature cache, and lock file for one
/// monitored account.
///
/// Independent accounts get independent directories, so they never
/// contend on the run lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPaths {
    dir: PathBuf,
}

impl AccountPaths {
    /// Lays out state files under `state_dir/<sanitized account>`.
    #[must_use]
    pub fn new(state_dir: &Path, account: &str) -> Self {
        Self {
            dir: state_dir.join(sanitize(account)),
        }
    }

    /// Lays out state files under the platform state directory
    /// (`~/.local/state/mailwatch/<account>` on Linux).
    #[must_use]
    pub fn for_account(account: &str) -> Option<Self> {
        let base = dirs::state_dir().or_else(dirs::data_local_dir)?;
        Some(Self::new(&base.join("mailwatch"), account))
    }

    /// The account state directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the checkpoint file.
    #[must_use]
    pub fn checkpoint_file(&self) -> PathBuf {
        self.dir.join("checkpoint")
    }

    /// Path of the signature cache file.
    #[must_use]
    pub fn signatures_file(&self) -> PathBuf {
        self.dir.join("signatures")
    }

    /// Path of the run lock file.
    #[must_use]
    pub fn lock_file(&self) -> PathBuf {
        self.dir.join("run.lock")
    }

    /// Creates the account directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }
}

/// Maps an account identifier to a directory-safe name.
fn sanitize(account: &str) -> String {
    let mapped: String = account
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '@' | '+') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if mapped.is_empty() {
        "default".to_owned()
    } else {
        mapped
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_per_account() {
        let a = AccountPaths::new(Path::new("/state"), "alice@example.org");
        let b = AccountPaths::new(Path::new("/state"), "bob@example.org");
        assert_ne!(a.lock_file(), b.lock_file());
        assert_eq!(
            a.checkpoint_file(),
            Path::new("/state/alice@example.org/checkpoint")
        );
        assert_eq!(
            a.signatures_file(),
            Path::new("/state/alice@example.org/signatures")
        );
    }

    #[test]
    fn test_sanitize_replaces_hostile_chars() {
        let p = AccountPaths::new(Path::new("/state"), "../../etc/passwd");
        assert_eq!(p.dir(), Path::new("/state/.._.._etc_passwd"));
    }

    #[test]
    fn test_sanitize_empty_account() {
        let p = AccountPaths::new(Path::new("/state"), "");
        assert_eq!(p.dir(), Path::new("/state/default"));
    }
}
