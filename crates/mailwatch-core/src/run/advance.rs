//! Checkpoint advancement.

use crate::message::Candidate;

/// Computes the new checkpoint from the run-start time and the full
/// fetched batch.
///
/// Takes the maximum successfully parsed date across **all** fetched
/// candidates, reportable or not, and never regresses below the time the
/// run began. A run that finds nothing (or only unparseable dates) still
/// advances the checkpoint to "now", so a permanently failing query
/// window cannot grow without bound.
#[must_use]
pub fn advance(run_start: i64, candidates: &[Candidate]) -> i64 {
    candidates
        .iter()
        .filter_map(Candidate::epoch_seconds)
        .max()
        .map_or(run_start, |newest| newest.max(run_start))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dated(date: &str) -> Candidate {
        Candidate {
            id: "m".to_owned(),
            date: date.to_owned(),
            ..Candidate::default()
        }
    }

    #[test]
    fn test_empty_batch_advances_to_run_start() {
        assert_eq!(advance(1_700_000_000, &[]), 1_700_000_000);
    }

    #[test]
    fn test_newest_candidate_wins_when_later_than_run_start() {
        let batch = [
            dated("2026-01-20T10:00:00Z"),
            dated("2026-01-20T11:30:00Z"),
        ];
        // run_start earlier than the newest message.
        assert_eq!(advance(1_768_903_200, &batch), 1_768_908_600);
    }

    #[test]
    fn test_run_start_wins_when_candidates_are_older() {
        let batch = [dated("2026-01-20T10:00:00Z")];
        assert_eq!(advance(1_768_999_999, &batch), 1_768_999_999);
    }

    #[test]
    fn test_unparseable_dates_are_ignored() {
        let batch = [dated("not a date"), dated("2026-01-20T11:30:00Z")];
        assert_eq!(advance(1_700_000_000, &batch), 1_768_908_600);
    }

    #[test]
    fn test_all_unparseable_falls_back_to_run_start() {
        let batch = [dated("???"), dated("")];
        assert_eq!(advance(42, &batch), 42);
    }
}
