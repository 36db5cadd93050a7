//! Metadata block codec.
//!
//! An artifact is free-form markup followed by a trailing block:
//!
//! ```text
//! <body>
//!
//! # Metadata
//! - report: GOOD
//! - updated: 2024-03-01T12:00:00Z
//! - note: nightly backup finished
//! ```
//!
//! Org-mode artifacts use `* Metadata` as the marker line.
//!
//! Responsibilities:
//! - Append a block, replacing any block already present.
//! - Locate the last marker line and parse the key/value lines after it.
//!
//! Does NOT handle:
//! - Interpreting the report label (see `resolve`).
//!
//! Invariants:
//! - Decoding never fails; an unusable block decodes as "no metadata".
//! - `decode(encode(body, m))` yields `body` and `m` for bodies that do not
//!   themselves end in a complete metadata block.
//! - `encode` only replaces a block that `decode` would accept.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Dialect, Report};
use crate::timestamp::{encode_timestamp, parse_timestamp, truncate};

/// Status block carried at the end of an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Report label as written on the wire.
    pub report: String,
    /// Time of the report, whole seconds.
    pub updated: DateTime<Utc>,
    pub note: Option<String>,
}

impl Metadata {
    pub fn new(report: Report, updated: DateTime<Utc>) -> Self {
        Self {
            report: report.as_str().to_string(),
            updated: truncate(updated),
            note: None,
        }
    }

    /// Attach a note. Line breaks are folded to spaces; a blank note is dropped.
    pub fn with_note(mut self, note: Option<&str>) -> Self {
        self.note = note
            .map(|n| n.replace(['\r', '\n'], " ").trim().to_string())
            .filter(|n| !n.is_empty());
        self
    }

    /// Normalized report and whether the label was recognized.
    pub fn normalized_report(&self) -> (Report, bool) {
        Report::normalize(&self.report)
    }
}

/// Last marker line followed by a complete block, with its parsed metadata.
///
/// A marker whose trailing lines are not all `- key: value`, or that lacks a
/// report or a readable timestamp, is body text.
fn find_block(text: &str, dialect: Dialect) -> Option<(usize, Metadata)> {
    let marker = dialect.metadata_marker();
    text.rmatch_indices(marker).find_map(|(idx, _)| {
        let at_line_start = idx == 0 || text[..idx].ends_with('\n');
        let rest = &text[idx + marker.len()..];
        let (marker_tail, after) = rest.split_once('\n').unwrap_or((rest, ""));
        if !at_line_start || !marker_tail.trim().is_empty() {
            return None;
        }
        parse_block(after).map(|metadata| (idx, metadata))
    })
}

/// Parse the lines after a marker. Every non-blank line must be a key/value
/// line, and both `report` and `updated` must be present.
fn parse_block(block: &str) -> Option<Metadata> {
    let mut report = None;
    let mut updated = None;
    let mut note = None;
    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let (key, value) = parse_line(line)?;
        match key.to_ascii_lowercase().as_str() {
            "report" => report = Some(value).filter(|v| !v.is_empty()),
            "updated" => updated = parse_timestamp(value),
            "note" => note = Some(value),
            _ => {}
        }
    }
    let metadata = Metadata {
        report: report?.to_string(),
        updated: updated?,
        note: None,
    };
    Some(metadata.with_note(note))
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.strip_prefix("- ")?.split_once(':')?;
    Some((key.trim(), value.trim()))
}

/// Text before the block at `idx`, without the separating blank line.
fn body_before(text: &str, idx: usize) -> &str {
    let head = &text[..idx];
    head.strip_suffix("\n\n")
        .or_else(|| head.strip_suffix('\n'))
        .unwrap_or(head)
}

/// Split an artifact into its body and metadata.
///
/// When there is no usable block the whole text is the body.
pub fn decode(text: &str, dialect: Dialect) -> (&str, Option<Metadata>) {
    match find_block(text, dialect) {
        Some((idx, metadata)) => (body_before(text, idx), Some(metadata)),
        None => (text, None),
    }
}

/// Append `metadata` to `body`, replacing a block already at its end.
pub fn encode(body: &str, metadata: &Metadata, dialect: Dialect) -> String {
    let body = match find_block(body, dialect) {
        Some((idx, _)) => body_before(body, idx),
        None => body,
    };
    let mut out = format!(
        "{body}\n\n{marker}\n- report: {report}\n- updated: {updated}\n",
        marker = dialect.metadata_marker(),
        report = metadata.report,
        updated = encode_timestamp(metadata.updated),
    );
    if let Some(note) = metadata.note.as_deref().filter(|n| !n.is_empty()) {
        out.push_str(&format!("- note: {note}\n"));
    }
    out
}
