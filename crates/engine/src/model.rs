//! Core data model: dialects, report labels, categories, locations and jobs.
//!
//! Responsibilities:
//! - Map file extensions to markup dialects.
//! - Normalize free-form report labels into a closed `Report` enum.
//! - Define the `JobSpec` identity (location + relative path) and its cadence.
//!
//! Invariants:
//! - A constructed `JobSpec` always has a non-empty path with a supported
//!   extension, including when deserialized from a snapshot.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::schedule::Cadence;

/// Markup dialect of an artifact or summary, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    #[serde(rename = "md")]
    Markdown,
    #[serde(rename = "org")]
    Org,
}

impl Dialect {
    /// Pick the dialect for a path from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedExtension`] for anything other than
    /// `.md` or `.org`.
    pub fn from_path(path: &str) -> Result<Self> {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("md") => Ok(Self::Markdown),
            Some("org") => Ok(Self::Org),
            _ => Err(EngineError::UnsupportedExtension(path.to_string())),
        }
    }

    /// Heading prefix for a top-level section.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Markdown => "#",
            Self::Org => "*",
        }
    }

    /// The line that opens the trailing metadata block of an artifact.
    pub fn metadata_marker(self) -> &'static str {
        match self {
            Self::Markdown => "# Metadata",
            Self::Org => "* Metadata",
        }
    }
}

/// What a job says about itself, normalized from the label in its metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Report {
    Good,
    Bad,
}

impl Report {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "GOOD",
            Self::Bad => "BAD",
        }
    }

    /// Normalize a wire label.
    ///
    /// Returns the report and whether the label was recognized. Unrecognized
    /// labels are treated as `Bad`.
    pub fn normalize(label: &str) -> (Self, bool) {
        match label.trim().to_ascii_uppercase().as_str() {
            "GOOD" | "OK" => (Self::Good, true),
            "BAD" | "ERROR" | "FAIL" | "FAILED" => (Self::Bad, true),
            _ => (Self::Bad, false),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Report {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match Self::normalize(s) {
            (report, true) => Ok(report),
            (_, false) => Err(EngineError::InvalidReport(s.to_string())),
        }
    }
}

/// Dashboard category of a job. Ordering is the section order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Error,
    Missing,
    Ok,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Error, Category::Missing, Category::Ok];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Missing => "MISSING",
            Self::Ok => "OK",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where artifacts live: a GitHub repository or a local git working tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    #[serde(rename = "github")]
    GitHub { owner: String, repo: String },
    Local { path: PathBuf },
}

impl Location {
    /// Interpret an owner/repo pair.
    ///
    /// A repo of the form `file:///some/path` names a local working tree and
    /// ignores the owner; anything else needs a non-empty owner.
    pub fn parse(owner: Option<&str>, repo: &str) -> Result<Self> {
        let repo = repo.trim();
        if let Some(path) = repo.strip_prefix("file://") {
            if path.is_empty() {
                return Err(EngineError::InvalidLocation(
                    "file:// location needs a path".to_string(),
                ));
            }
            return Ok(Self::Local {
                path: PathBuf::from(path),
            });
        }
        if repo.is_empty() {
            return Err(EngineError::InvalidLocation("repo cannot be empty".to_string()));
        }
        match owner.map(str::trim) {
            Some(owner) if !owner.is_empty() => Ok(Self::GitHub {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(EngineError::InvalidLocation(format!(
                "owner is required for GitHub repo '{repo}'"
            ))),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHub { owner, repo } => write!(f, "{owner}/{repo}"),
            Self::Local { path } => write!(f, "file://{}", path.display()),
        }
    }
}

/// A tracked job: one artifact at `path` in `location`, expected every `cadence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "JobSpecRecord", into = "JobSpecRecord")]
pub struct JobSpec {
    location: Location,
    path: String,
    cadence: Cadence,
    dialect: Dialect,
}

/// Wire form of a [`JobSpec`]; the dialect is derived, never stored.
#[derive(Serialize, Deserialize)]
struct JobSpecRecord {
    location: Location,
    path: String,
    cadence: Cadence,
}

impl TryFrom<JobSpecRecord> for JobSpec {
    type Error = EngineError;

    fn try_from(record: JobSpecRecord) -> Result<Self> {
        JobSpec::new(record.location, record.path, record.cadence)
    }
}

impl From<JobSpec> for JobSpecRecord {
    fn from(job: JobSpec) -> Self {
        Self {
            location: job.location,
            path: job.path,
            cadence: job.cadence,
        }
    }
}

impl JobSpec {
    /// Create a job spec, validating the path and its extension.
    pub fn new(location: Location, path: impl Into<String>, cadence: Cadence) -> Result<Self> {
        let path = path.into().trim().to_string();
        if path.is_empty() {
            return Err(EngineError::EmptyPath);
        }
        let dialect = Dialect::from_path(&path)?;
        Ok(Self {
            location,
            path,
            cadence,
            dialect,
        })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    /// Dialect of this job's artifact.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Stable identity used to match jobs across passes.
    pub fn key(&self) -> String {
        format!("{}:{}", self.location, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github() -> Location {
        Location::GitHub {
            owner: "acme".to_string(),
            repo: "status".to_string(),
        }
    }

    #[test]
    fn test_dialect_from_path() {
        assert_eq!(Dialect::from_path("jobs/a.md").unwrap(), Dialect::Markdown);
        assert_eq!(Dialect::from_path("b.org").unwrap(), Dialect::Org);
        assert!(matches!(
            Dialect::from_path("c.txt"),
            Err(EngineError::UnsupportedExtension(_))
        ));
        assert!(Dialect::from_path("README").is_err());
    }

    #[test]
    fn test_report_normalize() {
        assert_eq!(Report::normalize("GOOD"), (Report::Good, true));
        assert_eq!(Report::normalize("ok"), (Report::Good, true));
        assert_eq!(Report::normalize(" Error "), (Report::Bad, true));
        assert_eq!(Report::normalize("NOT_REPORTED"), (Report::Bad, false));
        assert!("maybe".parse::<Report>().is_err());
        assert_eq!("bad".parse::<Report>().unwrap(), Report::Bad);
    }

    #[test]
    fn test_category_order_is_section_order() {
        let mut categories = vec![Category::Ok, Category::Error, Category::Missing];
        categories.sort();
        assert_eq!(categories, Category::ALL.to_vec());
    }

    #[test]
    fn test_location_parse() {
        assert_eq!(Location::parse(Some("acme"), "status").unwrap(), github());
        assert_eq!(
            Location::parse(None, "file:///tmp/repo").unwrap(),
            Location::Local {
                path: PathBuf::from("/tmp/repo")
            }
        );
        assert!(Location::parse(None, "status").is_err());
        assert!(Location::parse(Some("acme"), " ").is_err());
        assert!(Location::parse(None, "file://").is_err());
    }

    #[test]
    fn test_job_spec_rejects_bad_paths() {
        let cadence: Cadence = "10m".parse().unwrap();
        assert_eq!(
            JobSpec::new(github(), "  ", cadence.clone()).unwrap_err(),
            EngineError::EmptyPath
        );
        assert!(JobSpec::new(github(), "a.json", cadence).is_err());
    }

    #[test]
    fn test_job_spec_json_round_trip_validates() {
        let job = JobSpec::new(github(), "a.org", "1h".parse().unwrap()).unwrap();
        let json = serde_json::to_string(&job).unwrap();
        assert!(json.contains("\"cadence\":\"1h\""));
        assert!(!json.contains("dialect"));

        let back: JobSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, job);
        assert_eq!(back.dialect(), Dialect::Org);

        let bad = json.replace("a.org", "a.txt");
        assert!(serde_json::from_str::<JobSpec>(&bad).is_err());
    }

    #[test]
    fn test_job_key_includes_location() {
        let job = JobSpec::new(github(), "a.md", "5m".parse().unwrap()).unwrap();
        assert_eq!(job.key(), "acme/status:a.md");
    }
}
