//! Typed query predicate for the provider search syntax.
//!
//! The priority match is built structurally instead of by string
//! concatenation so that empty OR-branches are omitted rather than
//! accidentally matching everything.

/// A structural search predicate, rendered to Gmail search syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Messages without the seen flag.
    Unread,
    /// Messages strictly newer than the given epoch second.
    After(i64),
    /// Primary-inbox messages, minus the given categories.
    InboxPrimary(Vec<String>),
    /// Membership in any of the given labels.
    AnyLabel(Vec<String>),
    /// Sender address in any of the given domains.
    AnyFromDomain(Vec<String>),
    /// Conjunction of predicates (empty members skipped).
    AllOf(Vec<Predicate>),
    /// Disjunction of predicates (empty members skipped).
    AnyOf(Vec<Predicate>),
}

impl Predicate {
    /// Returns true when the predicate would render to nothing.
    ///
    /// An empty set variant matches no message, so the whole branch is
    /// dropped from the query rather than rendered as a vacuous match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Unread | Self::After(_) | Self::InboxPrimary(_) => false,
            Self::AnyLabel(set) | Self::AnyFromDomain(set) => set.is_empty(),
            Self::AllOf(parts) | Self::AnyOf(parts) => parts.iter().all(Self::is_empty),
        }
    }

    /// Renders the predicate as a provider query string.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::AllOf(parts) => {
                let rendered: Vec<String> = parts
                    .iter()
                    .filter(|p| !p.is_empty())
                    .map(Self::render)
                    .collect();
                rendered.join(" ")
            }
            Self::AnyOf(_) | Self::AnyLabel(_) | Self::AnyFromDomain(_) => {
                let atoms = self.or_atoms();
                match atoms.len() {
                    0 => String::new(),
                    1 => atoms.into_iter().next().unwrap_or_default(),
                    _ => format!("({})", atoms.join(" OR ")),
                }
            }
            Self::Unread => "is:unread".to_owned(),
            Self::After(epoch) => format!("after:{epoch}"),
            Self::InboxPrimary(excludes) => {
                let mut out = String::from("in:inbox");
                for category in excludes {
                    out.push_str(" -category:");
                    push_value(&mut out, category);
                }
                out
            }
        }
    }

    /// Flattens this predicate into OR-composable atoms.
    ///
    /// Multi-term atoms are parenthesized so `OR` keeps the intended
    /// grouping in the provider's query grammar.
    fn or_atoms(&self) -> Vec<String> {
        match self {
            Self::AnyOf(parts) => parts.iter().flat_map(Self::or_atoms).collect(),
            Self::AnyLabel(labels) => labels
                .iter()
                .map(|label| {
                    let mut atom = String::from("label:");
                    push_value(&mut atom, label);
                    atom
                })
                .collect(),
            Self::AnyFromDomain(domains) => domains
                .iter()
                .map(|domain| {
                    let mut atom = String::from("from:");
                    push_value(&mut atom, domain);
                    atom
                })
                .collect(),
            other => {
                if other.is_empty() {
                    Vec::new()
                } else {
                    let rendered = other.render();
                    if rendered.contains(' ') {
                        vec![format!("({rendered})")]
                    } else {
                        vec![rendered]
                    }
                }
            }
        }
    }
}

/// Appends a term value, quoting it when it contains whitespace.
fn push_value(out: &mut String, value: &str) {
    if value.chars().any(char::is_whitespace) {
        out.push('"');
        out.push_str(value);
        out.push('"');
    } else {
        out.push_str(value);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|&v| v.to_owned()).collect()
    }

    #[test]
    fn test_render_after_and_unread() {
        assert_eq!(Predicate::After(1_700_000_000).render(), "after:1700000000");
        assert_eq!(Predicate::Unread.render(), "is:unread");
    }

    #[test]
    fn test_render_inbox_primary_with_excludes() {
        let p = Predicate::InboxPrimary(owned(&["promotions", "updates", "forums"]));
        assert_eq!(
            p.render(),
            "in:inbox -category:promotions -category:updates -category:forums"
        );
    }

    #[test]
    fn test_render_inbox_primary_without_excludes() {
        assert_eq!(Predicate::InboxPrimary(Vec::new()).render(), "in:inbox");
    }

    #[test]
    fn test_empty_set_branches_render_to_nothing() {
        assert!(Predicate::AnyLabel(Vec::new()).is_empty());
        assert!(Predicate::AnyFromDomain(Vec::new()).is_empty());
        assert_eq!(Predicate::AnyLabel(Vec::new()).render(), "");
        assert!(Predicate::AnyOf(vec![Predicate::AnyLabel(Vec::new())]).is_empty());
    }

    #[test]
    fn test_or_over_mixed_branches() {
        let p = Predicate::AnyOf(vec![
            Predicate::InboxPrimary(owned(&["promotions"])),
            Predicate::AnyLabel(owned(&["vip"])),
            Predicate::AnyFromDomain(owned(&["example.org", "example.net"])),
        ]);
        assert_eq!(
            p.render(),
            "((in:inbox -category:promotions) OR label:vip OR from:example.org OR from:example.net)"
        );
    }

    #[test]
    fn test_or_collapses_to_single_atom() {
        let p = Predicate::AnyOf(vec![
            Predicate::AnyLabel(Vec::new()),
            Predicate::AnyFromDomain(owned(&["example.org"])),
        ]);
        assert_eq!(p.render(), "from:example.org");
    }

    #[test]
    fn test_all_of_skips_empty_members() {
        let p = Predicate::AllOf(vec![
            Predicate::After(10),
            Predicate::AnyLabel(Vec::new()),
            Predicate::Unread,
        ]);
        assert_eq!(p.render(), "after:10 is:unread");
    }

    #[test]
    fn test_values_with_whitespace_are_quoted() {
        let p = Predicate::AnyLabel(owned(&["priority inbox"]));
        assert_eq!(p.render(), "label:\"priority inbox\"");
    }
}
