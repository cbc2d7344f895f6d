//! Error types for the Gmail CLI adapter.

use thiserror::Error;

/// Errors from invoking the external search command.
#[derive(Debug, Error)]
pub enum GmailError {
    /// The search command could not be started.
    #[error("failed to launch {program}: {source}")]
    Spawn {
        /// The program that failed to launch.
        program: String,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The search command exited unsuccessfully.
    #[error("search command failed ({status}): {stderr}")]
    CommandFailed {
        /// Exit status of the command.
        status: std::process::ExitStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The command's output was not the expected JSON array.
    #[error("unparseable search output: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured command line was empty.
    #[error("empty search command line")]
    EmptyCommand,
}

impl From<GmailError> for mailwatch_core::Error {
    fn from(err: GmailError) -> Self {
        Self::Source(err.to_string())
    }
}
