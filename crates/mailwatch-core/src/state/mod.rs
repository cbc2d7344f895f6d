//! Persistent per-account state: checkpoint, signature cache, run lock.

mod checkpoint;
mod lock;
mod paths;
mod signatures;

pub use checkpoint::{CheckpointStore, FileCheckpointStore, MemoryCheckpointStore};
pub use lock::{RunLock, RunLockGuard};
pub use paths::AccountPaths;
pub use signatures::{
    FileSignatureCache, MemorySignatureCache, SignatureCache, merge_observed, retain_newest,
};
