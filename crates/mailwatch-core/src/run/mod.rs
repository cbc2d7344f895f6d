//! Run orchestration.
//!
//! One invocation walks lock → checkpoint → query → fetch → dedup →
//! shape → commit, strictly serially. The checkpoint and signature cache
//! are read and written entirely inside the locked section, so two
//! overlapping invocations for the same account are linearized: the
//! second sees the first's fully committed state and deduplicates
//! against it.

mod advance;
mod dedup;
mod report;

pub use advance::advance;
pub use dedup::{DedupSplit, split_unseen};
pub use report::{Report, ReportedMessage, TRUNCATION_MARKER, shape};

use tracing::debug;

use crate::clock::Clock;
use crate::config::{PriorityFilter, RunSettings};
use crate::query::build_query;
use crate::source::MailSource;
use crate::state::{CheckpointStore, RunLock, SignatureCache, merge_observed};
use crate::{Result, state};

/// Terminal result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// New priority messages were found; the document goes to stdout.
    Reported(Report),
    /// Nothing to report; the checkpoint still advanced.
    NothingNew,
}

/// Executes one filter invocation.
///
/// Commit ordering: the signature cache and checkpoint are written only
/// after the result document has been fully assembled, cache first, both
/// atomically. A failure (or crash) before that point leaves the previous
/// state intact, giving the downstream notifier at-least-once semantics.
///
/// # Errors
///
/// Propagates collaborator failures ([`crate::Error::Source`]) and state
/// commit failures. On error the checkpoint and signature cache are
/// unmodified.
pub async fn run_once<Q, C, S>(
    source: &Q,
    checkpoint: &mut C,
    cache: &mut S,
    lock: &RunLock,
    clock: &dyn Clock,
    filter: &PriorityFilter,
    settings: &RunSettings,
) -> Result<RunOutcome>
where
    Q: MailSource,
    C: CheckpointStore,
    S: SignatureCache,
{
    let _guard = lock.acquire()?;
    let run_start = clock.now_epoch();

    let previous = checkpoint.read()?;
    debug!(?previous, run_start, "checkpoint loaded");

    let query = build_query(previous, run_start, settings.fallback_window, filter);
    debug!(%query, "query built");

    let candidates = source.search(&query, settings.max_results).await?;
    debug!(fetched = candidates.len(), "candidates fetched");

    let new_checkpoint = advance(run_start, &candidates);

    let cached = cache.load()?;
    let split = split_unseen(candidates, &cached);
    debug!(
        reportable = split.reportable.len(),
        observed = split.observed.len(),
        "deduplicated"
    );

    let document = shape(split.reportable, settings.max_body_chars);

    let merged = merge_observed(cached, &split.observed);
    cache.save(merged, settings.cache_capacity)?;
    checkpoint.write(new_checkpoint)?;
    debug!(new_checkpoint, "committed");

    Ok(document.map_or(RunOutcome::NothingNew, RunOutcome::Reported))
}

/// Convenience constructor for the file-backed store triple of one
/// account directory.
#[must_use]
pub fn file_state(
    paths: &state::AccountPaths,
) -> (
    state::FileCheckpointStore,
    state::FileSignatureCache,
    RunLock,
) {
    (
        state::FileCheckpointStore::new(paths.checkpoint_file()),
        state::FileSignatureCache::new(paths.signatures_file()),
        RunLock::new(paths.lock_file()),
    )
}
