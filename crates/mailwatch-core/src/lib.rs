//! # mailwatch-core
//!
//! Core pipeline of the incremental priority-mail event filter.
//!
//! Each invocation polls a priority-inbox query through an external mail
//! search collaborator, suppresses messages already reported in earlier
//! runs, and persists a monotonically advancing checkpoint plus a
//! bounded cache of seen message signatures. Overlapping invocations for
//! the same account are serialized by an exclusive per-account file
//! lock, so bursts of duplicate push notifications collapse into a
//! single report.
//!
//! This crate provides:
//! - Checkpoint and signature-cache stores (file-backed and in-memory)
//! - The blocking per-account run lock
//! - The typed query predicate and query builder
//! - Deduplication, result shaping, and checkpoint advancement
//! - The run orchestration tying it all together

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod clock;
pub mod config;
mod error;
pub mod message;
pub mod query;
pub mod run;
pub mod source;
pub mod state;

pub use clock::{Clock, MockClock, SystemClock};
pub use config::{PriorityFilter, RunSettings, default_config_path, load_filter};
pub use error::{Error, Result};
pub use message::{Candidate, Signature};
pub use query::{Predicate, build_query};
pub use run::{Report, ReportedMessage, RunOutcome, TRUNCATION_MARKER, file_state, run_once};
pub use source::MailSource;
pub use state::{
    AccountPaths, CheckpointStore, FileCheckpointStore, FileSignatureCache, MemoryCheckpointStore,
    MemorySignatureCache, RunLock, RunLockGuard, SignatureCache,
};
