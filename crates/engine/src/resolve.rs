//! Per-job status resolution.
//!
//! Classification is a pure function of the fetch outcome, the report label
//! and freshness at the reference time. The first matching rule wins:
//!
//! 1. fetch failed: MISSING, note is the fetch description
//! 2. no metadata: MISSING, note `no metadata found`
//! 3. report is BAD: ERROR, regardless of freshness
//! 4. report is GOOD but stale: MISSING, note carries the last-seen time
//! 5. otherwise OK

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::metadata::decode;
use crate::model::{Category, JobSpec, Report};
use crate::schedule::is_fresh;
use crate::timestamp::format_timestamp;

/// Why an artifact could not be read, reduced to a display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub description: String,
}

impl FetchFailure {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Outcome of classifying one job in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStatus {
    pub job: JobSpec,
    pub category: Category,
    /// Display note; empty when there is nothing to say.
    pub note: String,
    pub updated: Option<DateTime<Utc>>,
    pub fetch_error: Option<String>,
}

pub const NO_METADATA_NOTE: &str = "no metadata found";
pub const DEFAULT_BAD_NOTE: &str = "reported BAD";

/// Classify `job` from what was fetched for it.
pub fn resolve(
    job: &JobSpec,
    fetched: &Result<String, FetchFailure>,
    reference: DateTime<Utc>,
) -> ResolvedStatus {
    let status = |category, note: String, updated| ResolvedStatus {
        job: job.clone(),
        category,
        note,
        updated,
        fetch_error: None,
    };

    let text = match fetched {
        Ok(text) => text,
        Err(failure) => {
            return ResolvedStatus {
                fetch_error: Some(failure.description.clone()),
                ..status(Category::Missing, failure.description.clone(), None)
            };
        }
    };

    let Some(metadata) = decode(text, job.dialect()).1 else {
        return status(Category::Missing, NO_METADATA_NOTE.to_string(), None);
    };

    let updated = Some(metadata.updated);
    match metadata.normalized_report() {
        (Report::Bad, recognized) => {
            if !recognized {
                warn!(
                    job = %job.key(),
                    report = %metadata.report,
                    "Unrecognized report label, treating as BAD"
                );
            }
            let note = metadata.note.clone().unwrap_or_else(|| {
                if recognized {
                    DEFAULT_BAD_NOTE.to_string()
                } else {
                    format!("report '{}' treated as BAD", metadata.report)
                }
            });
            status(Category::Error, note, updated)
        }
        (Report::Good, _) if !is_fresh(job.cadence(), updated, reference) => status(
            Category::Missing,
            format!(
                "stale: last report {} (cadence {})",
                format_timestamp(metadata.updated),
                job.cadence()
            ),
            updated,
        ),
        (Report::Good, _) => status(Category::Ok, metadata.note.unwrap_or_default(), updated),
    }
}
