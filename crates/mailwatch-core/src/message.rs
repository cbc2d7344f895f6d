//! Candidate message model and signature derivation.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// A message returned by the mail query collaborator.
///
/// Transient: consumed within a single run, never persisted verbatim.
/// Only the derived [`Signature`] outlives the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Provider message identifier, if the provider supplied one.
    #[serde(default)]
    pub id: String,
    /// Provider thread identifier, if the provider supplied one.
    #[serde(default, rename = "threadId", alias = "thread_id")]
    pub thread_id: String,
    /// Sender address (possibly with display name).
    #[serde(default)]
    pub from: String,
    /// Message subject.
    #[serde(default)]
    pub subject: String,
    /// Date header as the provider reported it.
    #[serde(default)]
    pub date: String,
    /// Labels attached to the message.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Plain-text body.
    #[serde(default)]
    pub body: String,
}

impl Candidate {
    /// Derives the duplicate-detection signature for this message.
    ///
    /// Prefers the stable provider message id, then the thread id, then a
    /// composite of sender, subject and date string. Returns `None` when
    /// every component is empty: such a message cannot be tracked and is
    /// always reportable.
    #[must_use]
    pub fn signature(&self) -> Option<Signature> {
        let id = self.id.trim();
        if !id.is_empty() {
            return Some(Signature(id.to_owned()));
        }
        let thread_id = self.thread_id.trim();
        if !thread_id.is_empty() {
            return Some(Signature(thread_id.to_owned()));
        }
        let (from, subject, date) = (self.from.trim(), self.subject.trim(), self.date.trim());
        if from.is_empty() && subject.is_empty() && date.is_empty() {
            return None;
        }
        Some(Signature(format!("{from}|{subject}|{date}")))
    }

    /// Parses the date header into epoch seconds.
    ///
    /// Accepts RFC 2822 (the mail norm) and RFC 3339. Returns `None` for
    /// anything else; such candidates are excluded from checkpoint
    /// advancement but still reported and signature-recorded.
    #[must_use]
    pub fn epoch_seconds(&self) -> Option<i64> {
        let raw = self.date.trim();
        if raw.is_empty() {
            return None;
        }
        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .ok()
            .map(|dt| dt.timestamp())
    }
}

/// A derived identifier used to detect duplicate notifications across runs.
///
/// Invariant: never empty. Construction goes through
/// [`Candidate::signature`], which refuses to produce one for a message
/// with no identifying metadata at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// The signature as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the signature, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
