//! Query construction for the mail query collaborator.
//!
//! Combines the time filter (checkpoint or cold-start fallback window)
//! with the operator's priority filter into a single search string.

mod predicate;

pub use predicate::Predicate;

use std::time::Duration;

use crate::config::PriorityFilter;

/// Builds the provider search query for one run.
///
/// With a checkpoint, the query is restricted to messages strictly after
/// it. Without one (cold start), it covers the trailing fallback window
/// ending at `run_start`. The priority predicate is an OR over the
/// primary-inbox branch, the allow-listed labels, and the allow-listed
/// sender domains; label/domain branches with no configured entries are
/// omitted entirely. Unread-only is always appended.
#[must_use]
pub fn build_query(
    checkpoint: Option<i64>,
    run_start: i64,
    fallback_window: Duration,
    filter: &PriorityFilter,
) -> String {
    let window_secs = i64::try_from(fallback_window.as_secs()).unwrap_or(i64::MAX);
    let since = checkpoint.unwrap_or_else(|| run_start.saturating_sub(window_secs));

    Predicate::AllOf(vec![
        Predicate::After(since),
        Predicate::AnyOf(vec![
            Predicate::InboxPrimary(filter.exclude_categories.clone()),
            Predicate::AnyLabel(filter.labels.clone()),
            Predicate::AnyFromDomain(filter.domains.clone()),
        ]),
        Predicate::Unread,
    ])
    .render()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filter(domains: &[&str], labels: &[&str]) -> PriorityFilter {
        PriorityFilter {
            domains: domains.iter().map(|&d| d.to_owned()).collect(),
            labels: labels.iter().map(|&l| l.to_owned()).collect(),
            ..PriorityFilter::default()
        }
    }

    #[test]
    fn test_checkpoint_bounds_the_query() {
        let q = build_query(
            Some(1_700_000_000),
            1_700_003_600,
            Duration::from_secs(3600),
            &filter(&[], &[]),
        );
        assert!(q.starts_with("after:1700000000 "));
        assert!(q.ends_with(" is:unread"));
    }

    #[test]
    fn test_cold_start_uses_fallback_window() {
        let q = build_query(
            None,
            1_700_003_600,
            Duration::from_secs(3600),
            &filter(&[], &[]),
        );
        assert!(q.starts_with("after:1700000000 "));
    }

    #[test]
    fn test_full_priority_predicate() {
        let q = build_query(
            Some(5),
            10,
            Duration::from_secs(3600),
            &filter(&["example.org"], &["vip"]),
        );
        assert_eq!(
            q,
            "after:5 ((in:inbox -category:promotions -category:updates -category:forums) \
             OR label:vip OR from:example.org) is:unread"
        );
    }

    #[test]
    fn test_no_label_branch_when_labels_unconfigured() {
        // Allow-list domains only: the query must not grow a label branch.
        let q = build_query(
            Some(5),
            10,
            Duration::from_secs(3600),
            &filter(&["example.org"], &[]),
        );
        assert!(!q.contains("label:"));
        assert!(q.contains("from:example.org"));
    }
}
