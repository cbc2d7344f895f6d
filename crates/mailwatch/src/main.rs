//! `mailwatch` - incremental priority-mail event filter.
//!
//! One invocation per triggering event: polls the priority-inbox query,
//! drops messages already reported by earlier runs, prints the survivors
//! as JSON on stdout, and advances the per-account checkpoint.
//!
//! Exit codes: `0` report printed, `1` nothing to report, `2` failure.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mailwatch_core::{
    AccountPaths, CheckpointStore, Clock, PriorityFilter, RunOutcome, RunSettings, SystemClock,
    build_query, file_state, run_once,
};
use mailwatch_gmail::GmailCli;

/// Nothing to report (clean "no news" signal for the scheduler).
const EXIT_NOTHING_NEW: i32 = 1;
/// Genuine failure; detail on stderr.
const EXIT_FAILURE: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "mailwatch", version, about = "Priority-mail event filter")]
struct Cli {
    /// Account identifier; scopes checkpoint, cache, and lock.
    #[arg(long, env = "MAILWATCH_ACCOUNT", default_value = "default")]
    account: String,

    /// Directory holding per-account state (defaults to the platform
    /// state directory).
    #[arg(long, env = "MAILWATCH_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Path of the allow-list configuration file.
    #[arg(long, env = "MAILWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of messages fetched per run.
    #[arg(long, env = "MAILWATCH_MAX_RESULTS",
          default_value_t = mailwatch_core::config::DEFAULT_MAX_RESULTS)]
    max_results: u32,

    /// Cold-start fallback window in seconds.
    #[arg(long, env = "MAILWATCH_FALLBACK_WINDOW_SECS",
          default_value_t = mailwatch_core::config::DEFAULT_FALLBACK_WINDOW_SECS)]
    fallback_window_secs: u64,

    /// Per-message body truncation budget in characters.
    #[arg(long, env = "MAILWATCH_MAX_BODY_CHARS",
          default_value_t = mailwatch_core::config::DEFAULT_MAX_BODY_CHARS)]
    max_body_chars: usize,

    /// Signature cache capacity.
    #[arg(long, env = "MAILWATCH_CACHE_CAPACITY",
          default_value_t = mailwatch_core::config::DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,

    /// External search command line, e.g. "gog gmail search".
    #[arg(long, env = "MAILWATCH_GMAIL_COMMAND", default_value = "gog gmail search")]
    gmail_command: String,

    /// Print the composed query and exit without querying or touching
    /// state; operator aid for tuning the allow-lists.
    #[arg(long)]
    query_only: bool,
}

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr; stdout carries only the result document.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(Some(document)) => {
            println!("{document}");
        }
        Ok(None) => {
            std::process::exit(EXIT_NOTHING_NEW);
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "run failed");
            std::process::exit(EXIT_FAILURE);
        }
    }
}

/// Executes one invocation; `Some` is the stdout payload, `None` means
/// nothing to report.
async fn run(cli: Cli) -> anyhow::Result<Option<String>> {
    let filter = load_filter(&cli)?;
    let settings = RunSettings {
        max_results: cli.max_results,
        fallback_window: Duration::from_secs(cli.fallback_window_secs),
        max_body_chars: cli.max_body_chars,
        cache_capacity: cli.cache_capacity,
    };

    let paths = account_paths(&cli)?;
    debug!(account = %cli.account, dir = %paths.dir().display(), "state layout resolved");
    let (mut checkpoint, mut cache, lock) = file_state(&paths);

    if cli.query_only {
        let now = SystemClock.now_epoch();
        let query = build_query(checkpoint.read()?, now, settings.fallback_window, &filter);
        return Ok(Some(query));
    }

    let source = GmailCli::from_command_line(&cli.gmail_command)
        .context("invalid --gmail-command value")?;

    let outcome = run_once(
        &source,
        &mut checkpoint,
        &mut cache,
        &lock,
        &SystemClock,
        &filter,
        &settings,
    )
    .await?;

    match outcome {
        RunOutcome::Reported(report) => Ok(Some(report.to_json()?)),
        RunOutcome::NothingNew => Ok(None),
    }
}

fn load_filter(cli: &Cli) -> anyhow::Result<PriorityFilter> {
    let path = cli
        .config
        .clone()
        .or_else(mailwatch_core::default_config_path);
    match path {
        Some(path) => mailwatch_core::load_filter(&path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(PriorityFilter::default()),
    }
}

fn account_paths(cli: &Cli) -> anyhow::Result<AccountPaths> {
    match &cli.state_dir {
        Some(dir) => Ok(AccountPaths::new(dir, &cli.account)),
        None => AccountPaths::for_account(&cli.account)
            .ok_or_else(|| anyhow::anyhow!("no state directory available; set --state-dir")),
    }
}
