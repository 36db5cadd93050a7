//! Summary aggregation and change detection.
//!
//! Responsibilities:
//! - Group resolved statuses into ERROR, MISSING and OK sections.
//! - Order entries so any permutation of the input yields the same summary.
//! - Diff categories against the previous pass to produce changes.
//!
//! Invariants:
//! - Sections appear in `Category` order and are never empty.
//! - A change is reported only for a job present in both passes whose
//!   category differs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Category, Dialect};
use crate::resolve::ResolvedStatus;

/// One rendered line: a link to `path` followed by text and a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub path: String,
    pub text: String,
    pub updated: Option<DateTime<Utc>>,
}

/// A job whose category moved between passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub path: String,
    pub previous: Category,
    pub current: Category,
    pub note: String,
    pub updated: Option<DateTime<Utc>>,
}

impl Change {
    fn transition(&self) -> String {
        let arrow = format!("{} --> {}", self.previous, self.current);
        if self.note.is_empty() {
            arrow
        } else {
            format!("{arrow} {}", self.note)
        }
    }

    /// Plain-text message for notification sinks: `c.md: OK --> ERROR disk full`.
    pub fn message(&self) -> String {
        format!("{}: {}", self.path, self.transition())
    }

    pub fn entry(&self) -> Entry {
        Entry {
            path: self.path.clone(),
            text: self.transition(),
            updated: self.updated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub category: Category,
    pub entries: Vec<Entry>,
}

/// Result of one dashboard pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub dialect: Dialect,
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Category of every job in this pass, keyed by `JobSpec::key`.
    #[serde(default)]
    pub categories: BTreeMap<String, Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_text: Option<String>,
}

impl Summary {
    /// Attach free-form text rendered after the sections. Blank text is dropped.
    pub fn with_extra_text(mut self, extra_text: Option<&str>) -> Self {
        self.extra_text = extra_text
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string);
        self
    }

    pub fn section(&self, category: Category) -> Option<&Section> {
        self.sections.iter().find(|s| s.category == category)
    }

    /// Messages for every change, in summary order.
    pub fn change_messages(&self) -> Vec<String> {
        self.changes.iter().map(Change::message).collect()
    }
}

/// Aggregate `statuses` into a summary, diffing against `previous` when given.
pub fn build(statuses: &[ResolvedStatus], previous: Option<&Summary>, dialect: Dialect) -> Summary {
    let mut ordered: Vec<&ResolvedStatus> = statuses.iter().collect();
    ordered.sort_by(|a, b| {
        (a.job.path(), a.job.location(), a.category, &a.note, a.updated).cmp(&(
            b.job.path(),
            b.job.location(),
            b.category,
            &b.note,
            b.updated,
        ))
    });

    let sections = Category::ALL
        .iter()
        .filter_map(|&category| {
            let entries: Vec<Entry> = ordered
                .iter()
                .filter(|s| s.category == category)
                .map(|s| Entry {
                    path: s.job.path().to_string(),
                    text: s.note.clone(),
                    updated: s.updated,
                })
                .collect();
            (!entries.is_empty()).then_some(Section { category, entries })
        })
        .collect();

    let categories: BTreeMap<String, Category> = ordered
        .iter()
        .map(|s| (s.job.key(), s.category))
        .collect();

    let changes = previous
        .map(|prev| {
            ordered
                .iter()
                .filter_map(|s| {
                    let before = *prev.categories.get(&s.job.key())?;
                    (before != s.category).then(|| Change {
                        path: s.job.path().to_string(),
                        previous: before,
                        current: s.category,
                        note: s.note.clone(),
                        updated: s.updated,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Summary {
        dialect,
        changes,
        sections,
        categories,
        extra_text: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JobSpec, Location};

    fn status(path: &str, category: Category, note: &str) -> ResolvedStatus {
        let location = Location::GitHub {
            owner: "acme".to_string(),
            repo: "status".to_string(),
        };
        ResolvedStatus {
            job: JobSpec::new(location, path, "10m".parse().unwrap()).unwrap(),
            category,
            note: note.to_string(),
            updated: None,
            fetch_error: None,
        }
    }

    #[test]
    fn test_sections_in_order_and_sorted() {
        let statuses = vec![
            status("z.md", Category::Ok, ""),
            status("b.md", Category::Missing, "no metadata found"),
            status("a.md", Category::Ok, ""),
        ];
        let summary = build(&statuses, None, Dialect::Markdown);

        let order: Vec<Category> = summary.sections.iter().map(|s| s.category).collect();
        assert_eq!(order, vec![Category::Missing, Category::Ok]);
        let ok: Vec<&str> = summary
            .section(Category::Ok)
            .unwrap()
            .entries
            .iter()
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(ok, vec!["a.md", "z.md"]);
        assert!(summary.section(Category::Error).is_none());
        assert!(summary.changes.is_empty());
    }

    #[test]
    fn test_changes_only_for_transitions() {
        let first = build(
            &[
                status("c.md", Category::Ok, ""),
                status("d.md", Category::Ok, ""),
            ],
            None,
            Dialect::Markdown,
        );
        let second = build(
            &[
                status("c.md", Category::Error, "disk full"),
                status("d.md", Category::Ok, ""),
                status("e.md", Category::Missing, "no metadata found"),
            ],
            Some(&first),
            Dialect::Markdown,
        );

        assert_eq!(second.change_messages(), vec!["c.md: OK --> ERROR disk full"]);
        assert_eq!(second.changes[0].entry().text, "OK --> ERROR disk full");
    }

    #[test]
    fn test_extra_text() {
        let summary = build(&[], None, Dialect::Org).with_extra_text(Some("see runbook"));
        assert_eq!(summary.extra_text.as_deref(), Some("see runbook"));
        let summary = summary.with_extra_text(Some("  "));
        assert!(summary.extra_text.is_none());
    }
}
