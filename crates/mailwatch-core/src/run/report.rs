//! Shaping of reportable messages into the output document.

use serde::{Deserialize, Serialize};

use crate::message::Candidate;

/// Marker appended to a body that was cut to the size budget, so
/// downstream consumers can tell full from truncated content.
pub const TRUNCATION_MARKER: &str = "\n[truncated]";

/// The JSON document handed to the downstream notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Messages that have not been reported before.
    pub messages: Vec<ReportedMessage>,
}

impl Report {
    /// Serializes the document for stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (it should not for this
    /// shape).
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One message in the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedMessage {
    /// Sender address.
    pub from: String,
    /// Message subject.
    pub subject: String,
    /// Date header as the provider reported it.
    pub date: String,
    /// Labels attached to the message.
    pub labels: Vec<String>,
    /// Body text, truncated to the size budget.
    pub body: String,
}

/// Builds the output document from the reportable set.
///
/// Returns `None` when there is nothing to report; the run then signals
/// "nothing new" instead of emitting a document.
#[must_use]
pub fn shape(reportable: Vec<Candidate>, max_body_chars: usize) -> Option<Report> {
    if reportable.is_empty() {
        return None;
    }
    let messages = reportable
        .into_iter()
        .map(|candidate| ReportedMessage {
            from: candidate.from,
            subject: candidate.subject,
            date: candidate.date,
            labels: candidate.labels,
            body: truncate_body(&candidate.body, max_body_chars),
        })
        .collect();
    Some(Report { messages })
}

/// Cuts a body to at most `max_chars` Unicode scalar values, appending
/// the truncation marker when anything was dropped.
fn truncate_body(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        None => body.to_owned(),
        Some((cut, _)) => {
            let mut out = body[..cut].to_owned();
            out.push_str(TRUNCATION_MARKER);
            out
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn candidate(body: &str) -> Candidate {
        Candidate {
            id: "m".to_owned(),
            from: "a@example.org".to_owned(),
            subject: "s".to_owned(),
            date: "d".to_owned(),
            labels: vec!["INBOX".to_owned()],
            body: body.to_owned(),
            ..Candidate::default()
        }
    }

    #[test]
    fn test_empty_reportable_produces_no_document() {
        assert!(shape(Vec::new(), 3000).is_none());
    }

    #[test]
    fn test_short_body_untouched() {
        let report = shape(vec![candidate("short")], 3000).unwrap();
        assert_eq!(report.messages[0].body, "short");
    }

    #[test]
    fn test_long_body_truncated_with_marker() {
        let report = shape(vec![candidate(&"x".repeat(50))], 10).unwrap();
        let body = &report.messages[0].body;
        assert!(body.starts_with(&"x".repeat(10)));
        assert!(body.ends_with(TRUNCATION_MARKER));
        assert_eq!(body.chars().count(), 10 + TRUNCATION_MARKER.chars().count());
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        // Multi-byte scalars must not be split mid-code-point.
        let report = shape(vec![candidate("ééééé")], 3).unwrap();
        assert_eq!(
            report.messages[0].body,
            format!("ééé{TRUNCATION_MARKER}")
        );
    }

    #[test]
    fn test_exact_budget_is_not_marked() {
        let report = shape(vec![candidate("12345")], 5).unwrap();
        assert_eq!(report.messages[0].body, "12345");
    }

    #[test]
    fn test_document_shape() {
        let report = shape(vec![candidate("b")], 3000).unwrap();
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["messages"][0]["from"], "a@example.org");
        assert_eq!(value["messages"][0]["labels"][0], "INBOX");
    }
}
