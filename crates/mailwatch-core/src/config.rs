//! Run settings and the operator-edited priority filter configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default maximum number of messages fetched per run.
pub const DEFAULT_MAX_RESULTS: u32 = 10;
/// Default cold-start fallback window in seconds (1 hour).
pub const DEFAULT_FALLBACK_WINDOW_SECS: u64 = 3600;
/// Default body truncation budget in characters.
pub const DEFAULT_MAX_BODY_CHARS: usize = 3000;
/// Default signature cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

/// Allow-list configuration describing what counts as priority mail.
///
/// Edited by an operator, never mutated at runtime by this component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityFilter {
    /// Sender domains that always qualify (e.g. `example.org`).
    #[serde(default)]
    pub domains: Vec<String>,
    /// Labels that always qualify.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Inbox categories excluded from the primary-inbox branch.
    #[serde(default = "default_exclude_categories")]
    pub exclude_categories: Vec<String>,
}

fn default_exclude_categories() -> Vec<String> {
    vec![
        "promotions".to_owned(),
        "updates".to_owned(),
        "forums".to_owned(),
    ]
}

impl Default for PriorityFilter {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            labels: Vec::new(),
            exclude_categories: default_exclude_categories(),
        }
    }
}

/// Tunables for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Maximum number of candidate messages to fetch.
    pub max_results: u32,
    /// Cold-start window when no checkpoint exists yet.
    pub fallback_window: Duration,
    /// Per-message body truncation budget, in characters.
    pub max_body_chars: usize,
    /// Signature cache capacity (oldest entries evicted first).
    pub cache_capacity: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            fallback_window: Duration::from_secs(DEFAULT_FALLBACK_WINDOW_SECS),
            max_body_chars: DEFAULT_MAX_BODY_CHARS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// On-disk configuration file shape (`config.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// The `[filter]` table.
    #[serde(default)]
    pub filter: PriorityFilter,
}

/// Default location of the operator configuration file.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mailwatch").join("config.toml"))
}

/// Loads the priority filter from a TOML file.
///
/// A missing file yields the built-in defaults; a malformed file is a hard
/// error since it is operator-edited input rather than state this
/// component wrote itself.
///
/// # Errors
///
/// Returns [`Error::Config`] if the file exists but cannot be read or
/// parsed.
pub fn load_filter(path: &Path) -> Result<PriorityFilter> {
    if !path.exists() {
        return Ok(PriorityFilter::default());
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
    let parsed: ConfigFile = toml::from_str(&raw)
        .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))?;
    Ok(parsed.filter)
}
