//! Persisted dashboard state.
//!
//! The snapshot lives next to the rendered summary at `<summary path>.json`
//! and holds everything needed to run the next pass from bare credentials:
//! the tracked jobs and the previous summary used for change detection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::model::{Dialect, JobSpec, Location};
use crate::summary::Summary;

/// Path of the snapshot that belongs to `summary_path`.
pub fn snapshot_path(summary_path: &str) -> String {
    format!("{summary_path}.json")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub location: Location,
    pub summary_path: String,
    #[serde(default)]
    pub jobs: Vec<JobSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_summary: Option<Summary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    /// Empty dashboard writing its summary to `summary_path`.
    pub fn new(location: Location, summary_path: impl Into<String>) -> Result<Self> {
        let summary_path = summary_path.into().trim().to_string();
        if summary_path.is_empty() {
            return Err(EngineError::EmptyPath);
        }
        Dialect::from_path(&summary_path)?;
        Ok(Self {
            location,
            summary_path,
            jobs: Vec::new(),
            last_summary: None,
            generated_at: None,
        })
    }

    /// Dialect of the rendered summary.
    pub fn dialect(&self) -> Result<Dialect> {
        Dialect::from_path(&self.summary_path)
    }

    /// Add `job`, replacing a tracked job with the same location and path.
    ///
    /// Returns `true` when an existing job was replaced.
    pub fn track(&mut self, job: JobSpec) -> bool {
        let key = job.key();
        match self.jobs.iter_mut().find(|j| j.key() == key) {
            Some(existing) => {
                *existing = job;
                true
            }
            None => {
                self.jobs.push(job);
                false
            }
        }
    }

    /// Stop tracking the job at `path` in `location`. Returns whether one was
    /// removed.
    pub fn untrack(&mut self, location: &Location, path: &str) -> bool {
        let path = path.trim();
        let before = self.jobs.len();
        self.jobs
            .retain(|j| !(j.location() == location && j.path() == path));
        self.jobs.len() != before
    }

    pub fn to_json(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::InvalidSnapshot(e.to_string()))?;
        text.push('\n');
        Ok(text)
    }

    /// Parse a snapshot, rejecting one whose summary path has no dialect.
    pub fn from_json(text: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(text).map_err(|e| EngineError::InvalidSnapshot(e.to_string()))?;
        snapshot.dialect()?;
        Ok(snapshot)
    }
}
