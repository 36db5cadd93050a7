//! Posting job reports.

use chrono::{DateTime, Utc};
use tracing::info;
use vitals_engine::{Dialect, Metadata, Report, encode};

use crate::error::Result;
use crate::store::ArtifactStore;

/// Writes job artifacts with a fresh metadata block.
#[derive(Debug)]
pub struct Reporter<'a, S> {
    store: &'a S,
}

impl<'a, S: ArtifactStore> Reporter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Encode `content` with a metadata block and write it to `path`.
    ///
    /// Any metadata block already present in `content` is replaced. Returns the
    /// text that was written.
    ///
    /// # Errors
    ///
    /// Fails with an engine error when the extension of `path` has no dialect,
    /// and with the store's error when the write fails.
    pub async fn post(
        &self,
        path: &str,
        content: &str,
        report: Report,
        note: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let dialect = Dialect::from_path(path)?;
        let metadata = Metadata::new(report, now).with_note(note);
        let text = encode(content, &metadata, dialect);

        self.store
            .put(path, &text, &format!("Update {path}"))
            .await?;
        info!(path, %report, store = %self.store.describe(), "Posted report");
        Ok(text)
    }
}
