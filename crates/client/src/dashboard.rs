//! Dashboard passes: fetch every tracked job, resolve, summarize, write.
//!
//! Responsibilities:
//! - Load and save the dashboard snapshot at `<summary path>.json`.
//! - Run one sequential pass over the tracked jobs.
//! - Commit the rendered summary together with the updated snapshot.
//!
//! Does NOT handle:
//! - Classification, aggregation or rendering (see `vitals-engine`).
//! - Delivering notifications (see [`crate::notify`]).
//!
//! Invariants:
//! - A failed fetch never aborts a pass; it becomes a MISSING entry.
//! - The previous summary used for change detection is the one stored in the
//!   snapshot when the pass starts.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use vitals_config::constants::SUMMARY_COMMIT_MESSAGE;
use vitals_engine::{
    DashboardSnapshot, EngineError, FetchFailure, JobSpec, Location, Summary, build, render,
    resolve, snapshot_path,
};

use crate::error::{ClientError, Result};
use crate::store::{ArtifactSource, ArtifactStore};

/// Commit message used when only the tracked job list changes.
pub const JOBS_COMMIT_MESSAGE: &str = "Update tracked jobs";

/// A dashboard and its persisted state.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    snapshot: DashboardSnapshot,
}

impl Dashboard {
    /// Empty dashboard in `location` rendering to `summary_path`.
    pub fn new(location: Location, summary_path: &str) -> Result<Self> {
        Ok(Self {
            snapshot: DashboardSnapshot::new(location, summary_path)?,
        })
    }

    pub fn from_snapshot(snapshot: DashboardSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn jobs(&self) -> &[JobSpec] {
        &self.snapshot.jobs
    }

    pub fn summary_path(&self) -> &str {
        &self.snapshot.summary_path
    }

    /// Summary produced by the most recent pass, if any.
    pub fn last_summary(&self) -> Option<&Summary> {
        self.snapshot.last_summary.as_ref()
    }

    /// Reconstruct the dashboard from the snapshot stored next to `summary_path`.
    ///
    /// # Errors
    ///
    /// Returns the store's not-found error when no snapshot exists, and
    /// `EngineError::InvalidSnapshot` when it cannot be parsed.
    pub async fn load<S: ArtifactStore>(store: &S, summary_path: &str) -> Result<Self> {
        let path = snapshot_path(summary_path.trim());
        let text = store.fetch(&path).await?;
        let mut snapshot = DashboardSnapshot::from_json(&text)?;
        if snapshot.summary_path != summary_path.trim() {
            debug!(
                stored = %snapshot.summary_path,
                requested = summary_path,
                "Snapshot summary path differs, using requested path"
            );
            let renamed = DashboardSnapshot::new(snapshot.location.clone(), summary_path)?;
            snapshot.summary_path = renamed.summary_path;
        }
        info!(path, jobs = snapshot.jobs.len(), "Loaded dashboard");
        Ok(Self { snapshot })
    }

    /// Like [`Dashboard::load`], but start an empty dashboard in the store's
    /// location when there is no snapshot yet.
    pub async fn load_or_new<S: ArtifactStore>(store: &S, summary_path: &str) -> Result<Self> {
        match Self::load(store, summary_path).await {
            Ok(dashboard) => Ok(dashboard),
            Err(e) if e.is_not_found() => {
                info!(summary_path, "No dashboard snapshot, starting empty");
                Self::new(store.location(), summary_path)
            }
            Err(e) => Err(e),
        }
    }

    /// Add or replace a tracked job. Returns `true` when one was replaced.
    pub fn track(&mut self, job: JobSpec) -> bool {
        self.snapshot.track(job)
    }

    /// Stop tracking `path` in `location`. Returns whether a job was removed.
    pub fn untrack(&mut self, location: &Location, path: &str) -> bool {
        self.snapshot.untrack(location, path)
    }

    /// Run one pass at reference time `now` and remember the result.
    ///
    /// Jobs are fetched one after another in tracking order. Any fetch error,
    /// including a timeout, is recorded against its job and the pass goes on.
    pub async fn refresh<A: ArtifactSource>(
        &mut self,
        source: &A,
        now: DateTime<Utc>,
        extra_text: Option<&str>,
    ) -> Result<Summary> {
        let dialect = self.snapshot.dialect()?;
        let mut statuses = Vec::with_capacity(self.snapshot.jobs.len());

        for job in &self.snapshot.jobs {
            let fetched = source
                .fetch_at(job.location(), job.path())
                .await
                .map_err(|e| {
                    warn!(job = %job.key(), error = %e, "Fetch failed");
                    FetchFailure::new(e.fetch_description())
                });
            let status = resolve(job, &fetched, now);
            debug!(job = %job.key(), category = %status.category, "Resolved job");
            statuses.push(status);
        }

        let summary = build(&statuses, self.snapshot.last_summary.as_ref(), dialect)
            .with_extra_text(extra_text);
        info!(
            jobs = statuses.len(),
            changes = summary.changes.len(),
            "Refreshed dashboard"
        );

        self.snapshot.last_summary = Some(summary.clone());
        self.snapshot.generated_at = Some(now);
        Ok(summary)
    }

    /// Rendered text of the last summary.
    pub fn rendered(&self) -> Option<String> {
        self.last_summary().map(render)
    }

    /// Commit the rendered summary and the snapshot in one commit.
    ///
    /// Returns the rendered summary text.
    pub async fn write<S: ArtifactStore>(&self, store: &S) -> Result<String> {
        let text = self.rendered().ok_or_else(|| {
            ClientError::Engine(EngineError::InvalidSnapshot(
                "no summary to write; refresh first".to_string(),
            ))
        })?;
        let files = vec![
            (self.snapshot.summary_path.clone(), text.clone()),
            (
                snapshot_path(&self.snapshot.summary_path),
                self.snapshot.to_json()?,
            ),
        ];
        store.commit(&files, SUMMARY_COMMIT_MESSAGE).await?;
        info!(store = %store.describe(), path = %self.snapshot.summary_path, "Wrote summary");
        Ok(text)
    }

    /// Commit only the snapshot, after editing the tracked jobs.
    pub async fn save_jobs<S: ArtifactStore>(&self, store: &S) -> Result<()> {
        let files = vec![(
            snapshot_path(&self.snapshot.summary_path),
            self.snapshot.to_json()?,
        )];
        store.commit(&files, JOBS_COMMIT_MESSAGE).await
    }
}
