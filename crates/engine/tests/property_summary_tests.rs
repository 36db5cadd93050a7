//! Property-based tests for summary aggregation.
//!
//! # Invariants
//! - Any permutation of the resolved statuses yields the same summary and
//!   the same rendered text.
//! - Every status lands in exactly one section entry.

use proptest::prelude::*;
use vitals_engine::{
    Category, Dialect, JobSpec, Location, ResolvedStatus, Summary, build, render,
};

fn category_strategy() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Error),
        Just(Category::Missing),
        Just(Category::Ok)
    ]
}

fn status_strategy() -> impl Strategy<Value = ResolvedStatus> {
    (
        "[a-e]{1,2}",
        prop_oneof![Just("md"), Just("org")],
        prop_oneof![Just("acme"), Just("other")],
        category_strategy(),
        "[a-z ]{0,12}",
    )
        .prop_map(|(stem, ext, owner, category, note)| {
            let location = Location::GitHub {
                owner: owner.to_string(),
                repo: "status".to_string(),
            };
            let job =
                JobSpec::new(location, format!("{stem}.{ext}"), "10m".parse().unwrap()).unwrap();
            ResolvedStatus {
                job,
                category,
                note,
                updated: None,
                fetch_error: None,
            }
        })
}

fn statuses_with_shuffle() -> impl Strategy<Value = (Vec<ResolvedStatus>, Vec<ResolvedStatus>)> {
    proptest::collection::vec(status_strategy(), 0..12)
        .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
}

fn entry_count(summary: &Summary) -> usize {
    summary.sections.iter().map(|s| s.entries.len()).sum()
}

proptest! {
    #[test]
    fn prop_build_ignores_input_order(
        (original, shuffled) in statuses_with_shuffle(),
        previous_shuffle in statuses_with_shuffle(),
    ) {
        let previous = build(&previous_shuffle.0, None, Dialect::Markdown);
        let a = build(&original, Some(&previous), Dialect::Markdown);
        let b = build(&shuffled, Some(&previous), Dialect::Markdown);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(render(&a), render(&b));
    }

    #[test]
    fn prop_every_status_has_one_entry((statuses, _) in statuses_with_shuffle()) {
        let summary = build(&statuses, None, Dialect::Org);
        prop_assert_eq!(entry_count(&summary), statuses.len());
        prop_assert!(summary.sections.iter().all(|s| !s.entries.is_empty()));
        prop_assert!(summary.changes.is_empty());
    }
}
