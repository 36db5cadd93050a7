//! Status aggregation and staleness detection for job health reports.
//!
//! Jobs write markup artifacts ending in a metadata block. This crate decodes
//! those blocks, decides whether each job is OK, in ERROR or MISSING at a given
//! reference time, aggregates the results into a summary with changes since the
//! previous pass, and renders it as markdown or org-mode. It performs no I/O.

pub mod error;
pub mod metadata;
pub mod model;
pub mod render;
pub mod resolve;
pub mod schedule;
pub mod snapshot;
pub mod summary;
pub mod timestamp;

pub use error::{EngineError, Result};
pub use metadata::{Metadata, decode, encode};
pub use model::{Category, Dialect, JobSpec, Location, Report};
pub use render::render;
pub use resolve::{FetchFailure, ResolvedStatus, resolve};
pub use schedule::{Cadence, is_fresh};
pub use snapshot::{DashboardSnapshot, snapshot_path};
pub use summary::{Change, Entry, Section, Summary, build};
pub use timestamp::{format_timestamp, parse_timestamp};
