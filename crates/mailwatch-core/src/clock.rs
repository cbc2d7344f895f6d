//! Time abstraction for testability.
//!
//! This module provides a `Clock` trait that abstracts over wall-clock
//! time, enabling deterministic testing of the checkpoint-advancement
//! behavior without sleeping or patching the system clock.
//!
//! # Example
//!
//! ```
//! use mailwatch_core::clock::{Clock, SystemClock};
//!
//! let clock = SystemClock;
//! assert!(clock.now_epoch() > 0);
//! ```

use std::sync::atomic::{AtomicI64, Ordering};

/// Abstraction over wall-clock time for testability.
///
/// In production, use [`SystemClock`] which delegates to [`chrono::Utc`].
/// In tests, use [`MockClock`] to control time deterministically.
pub trait Clock: Send + Sync {
    /// Returns the current time as whole seconds since the Unix epoch.
    fn now_epoch(&self) -> i64;
}

/// System clock that uses real time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A mock clock for testing time-dependent code.
///
/// The clock starts at a fixed epoch second and can be advanced manually.
///
/// # Example
///
/// ```
/// use mailwatch_core::clock::{Clock, MockClock};
///
/// let clock = MockClock::new(1_700_000_000);
/// clock.advance(60);
/// assert_eq!(clock.now_epoch(), 1_700_000_060);
/// ```
#[derive(Debug)]
pub struct MockClock {
    now: AtomicI64,
}

impl MockClock {
    /// Creates a mock clock fixed at the given epoch second.
    #[must_use]
    pub const fn new(epoch: i64) -> Self {
        Self {
            now: AtomicI64::new(epoch),
        }
    }

    /// Advances the clock by the given number of seconds.
    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute epoch second.
    pub fn set(&self, epoch: i64) {
        self.now.store(epoch, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now_epoch(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
