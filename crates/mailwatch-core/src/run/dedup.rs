//! Duplicate suppression against the signature cache.

use std::collections::HashSet;

use crate::message::{Candidate, Signature};

/// Outcome of deduplicating one fetched batch.
#[derive(Debug, Clone, Default)]
pub struct DedupSplit {
    /// Candidates whose signature is not already in the cache.
    pub reportable: Vec<Candidate>,
    /// Signatures of every candidate in the batch, reportable or not.
    ///
    /// Recording the already-reported ones too is deliberate: a message
    /// that arrives again via a duplicate push event must still end up
    /// recorded, so that it cannot be reported twice even if the first
    /// run's report and cache update raced with this one.
    pub observed: Vec<Signature>,
}

/// Splits a fetched batch into reportable candidates and the full set of
/// observed signatures.
///
/// A candidate with no derivable signature is always reportable, since it
/// cannot be tracked; it contributes nothing to `observed`.
#[must_use]
pub fn split_unseen(candidates: Vec<Candidate>, cached: &[String]) -> DedupSplit {
    let known: HashSet<&str> = cached.iter().map(String::as_str).collect();
    let mut split = DedupSplit::default();
    for candidate in candidates {
        match candidate.signature() {
            Some(signature) => {
                if !known.contains(signature.as_str()) {
                    split.reportable.push(candidate);
                }
                split.observed.push(signature);
            }
            None => split.reportable.push(candidate),
        }
    }
    split
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn candidate(id: &str, subject: &str) -> Candidate {
        Candidate {
            id: id.to_owned(),
            subject: subject.to_owned(),
            from: "a@example.org".to_owned(),
            ..Candidate::default()
        }
    }

    #[test]
    fn test_unseen_candidates_are_reportable() {
        let split = split_unseen(vec![candidate("s1", "one"), candidate("s2", "two")], &[]);
        assert_eq!(split.reportable.len(), 2);
        assert_eq!(split.observed.len(), 2);
    }

    #[test]
    fn test_cached_signature_suppresses_report_but_stays_observed() {
        let cached = vec!["s1".to_owned()];
        let split = split_unseen(vec![candidate("s1", "one"), candidate("s2", "two")], &cached);
        assert_eq!(split.reportable.len(), 1);
        assert_eq!(split.reportable[0].subject, "two");
        // Both signatures observed, including the suppressed one.
        let observed: Vec<&str> = split.observed.iter().map(Signature::as_str).collect();
        assert_eq!(observed, vec!["s1", "s2"]);
    }

    #[test]
    fn test_untrackable_candidate_always_reportable() {
        let blank = Candidate {
            body: "no headers at all".to_owned(),
            ..Candidate::default()
        };
        let split = split_unseen(vec![blank], &["anything".to_owned()]);
        assert_eq!(split.reportable.len(), 1);
        assert!(split.observed.is_empty());
    }
}
