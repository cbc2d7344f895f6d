//! Seam for the external mail query collaborator.

use std::future::Future;

use crate::Result;
use crate::message::Candidate;

/// Executes a search query against the mail provider.
///
/// The provider is treated as a stateless, independently rate-limited
/// external resource; implementations carry no locking obligation. The
/// production implementation lives in `mailwatch-gmail`; tests inject
/// scripted stubs.
pub trait MailSource {
    /// Runs `query` and returns at most `max_results` candidate messages
    /// with metadata and body text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Source`] when the provider is unreachable
    /// or returns unusable data. The caller leaves checkpoint and
    /// signature cache untouched in that case.
    fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> impl Future<Output = Result<Vec<Candidate>>> + Send;
}
