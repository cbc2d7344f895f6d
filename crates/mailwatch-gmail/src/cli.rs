//! Subprocess wrapper around an external Gmail search command.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use mailwatch_core::{Candidate, MailSource};

use crate::error::GmailError;

/// Mail source backed by an external search CLI.
///
/// The command is invoked as
/// `<program> <args…> --query <query> --max-results <n> --json` and must
/// print a JSON array of message objects
/// (`{id, threadId, from, subject, date, labels, body}`) on stdout and
/// exit zero. Empty stdout counts as an empty result set.
#[derive(Debug, Clone)]
pub struct GmailCli {
    program: String,
    args: Vec<String>,
}

impl GmailCli {
    /// Creates an adapter for the given program and leading arguments.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parses a whitespace-separated command line, e.g. `"gog gmail search"`.
    ///
    /// # Errors
    ///
    /// Returns [`GmailError::EmptyCommand`] for a blank command line.
    pub fn from_command_line(command: &str) -> Result<Self, GmailError> {
        let mut parts = command.split_whitespace().map(str::to_owned);
        let program = parts.next().ok_or(GmailError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    async fn invoke(&self, query: &str, max_results: u32) -> Result<Vec<Candidate>, GmailError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg("--query")
            .arg(query)
            .arg("--max-results")
            .arg(max_results.to_string())
            .arg("--json")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| GmailError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GmailError::CommandFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return Ok(Vec::new());
        }
        let candidates: Vec<Candidate> = serde_json::from_str(stdout.trim())?;
        debug!(count = candidates.len(), "search command returned candidates");
        Ok(candidates)
    }
}

impl Default for GmailCli {
    fn default() -> Self {
        Self::new("gog", vec!["gmail".to_owned(), "search".to_owned()])
    }
}

impl MailSource for GmailCli {
    async fn search(&self, query: &str, max_results: u32) -> mailwatch_core::Result<Vec<Candidate>> {
        Ok(self.invoke(query, max_results).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Runs a shell snippet in place of a real provider CLI. The snippet
    /// sees the appended `--query …` arguments as `$1..`, which these
    /// tests ignore.
    fn scripted(snippet: &str) -> GmailCli {
        GmailCli::new("sh", vec!["-c".to_owned(), snippet.to_owned()])
    }

    #[tokio::test]
    async fn test_parses_json_array_output() {
        let cli = scripted(
            r#"echo '[{"id":"m1","threadId":"t1","from":"a@example.org","subject":"hi","date":"Tue, 20 Jan 2026 10:00:00 +0000","labels":["INBOX"],"body":"text"}]'"#,
        );
        let messages = cli.search("is:unread", 10).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, "m1");
        assert_eq!(messages[0].thread_id, "t1");
        assert_eq!(messages[0].labels, vec!["INBOX"]);
    }

    #[tokio::test]
    async fn test_empty_stdout_is_an_empty_result() {
        let cli = scripted("true");
        let messages = cli.search("is:unread", 10).await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_a_source_error() {
        let cli = scripted("echo provider exploded >&2; exit 3");
        let err = cli.invoke("is:unread", 10).await.unwrap_err();
        match err {
            GmailError::CommandFailed { stderr, .. } => {
                assert_eq!(stderr, "provider exploded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_garbage_stdout_is_a_parse_error() {
        let cli = scripted("echo not-json");
        let err = cli.invoke("is:unread", 10).await.unwrap_err();
        assert!(matches!(err, GmailError::Parse(_)));
    }

    #[tokio::test]
    async fn test_missing_program_is_a_spawn_error() {
        let cli = GmailCli::new("definitely-not-a-real-binary-ae41", Vec::new());
        let err = cli.invoke("is:unread", 10).await.unwrap_err();
        assert!(matches!(err, GmailError::Spawn { .. }));
    }

    #[test]
    fn test_from_command_line() {
        let cli = GmailCli::from_command_line("gog gmail search").unwrap();
        assert_eq!(cli.program, "gog");
        assert_eq!(cli.args, vec!["gmail", "search"]);

        assert!(matches!(
            GmailCli::from_command_line("   "),
            Err(GmailError::EmptyCommand)
        ));
    }

    #[tokio::test]
    async fn test_query_is_passed_through() {
        // `sh -c` binds the appended arguments as $0.. ; the query value
        // lands in $1. Echo it back as the subject.
        let cli = scripted(r#"printf '[{"id":"q","subject":"%s"}]' "$1""#);
        let messages = cli.search("after:5 is:unread", 10).await.unwrap();
        assert_eq!(messages[0].subject, "after:5 is:unread");
    }
}
