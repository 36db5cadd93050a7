//! File existence check command.
//!
//! Reports GOOD when every path exists and BAD otherwise, listing the
//! missing paths in the report body. Without a configured repository the
//! report is printed instead of posted.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use vitals_client::Reporter;
use vitals_config::Config;
use vitals_engine::Report;

use super::open_store;

/// Default report body; `{bad_list}` and `{good_list}` are substituted.
pub const DEFAULT_TEMPLATE: &str = "# File Check\n{bad_list}\n{good_list}\n";

/// Outcome of checking a set of paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCheck {
    pub good: Vec<String>,
    pub bad: Vec<String>,
}

impl FileCheck {
    pub async fn run(paths: &[PathBuf]) -> Self {
        let mut check = Self {
            good: Vec::new(),
            bad: Vec::new(),
        };
        for path in paths {
            let exists = tokio::fs::try_exists(path).await.unwrap_or(false);
            let name = path.display().to_string();
            if exists {
                check.good.push(name);
            } else {
                check.bad.push(name);
            }
        }
        check
    }

    pub fn report(&self) -> Report {
        if self.bad.is_empty() {
            Report::Good
        } else {
            Report::Bad
        }
    }

    pub fn note(&self) -> String {
        if self.bad.is_empty() {
            "all paths good".to_string()
        } else {
            format!("{} bad paths", self.bad.len())
        }
    }

    pub fn content(&self, template: &str) -> String {
        let bad_list = if self.bad.is_empty() {
            String::new()
        } else {
            format!("\n## Bad Paths\n{}\n", bullet_list(&self.bad))
        };
        let good_list = if self.good.is_empty() {
            String::new()
        } else {
            format!("## Good Paths\n{}", bullet_list(&self.good))
        };
        template
            .replace("{bad_list}", &bad_list)
            .replace("{good_list}", &good_list)
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("  - {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn run(
    config: &Config,
    paths: &[PathBuf],
    report_path: &str,
    note: Option<&str>,
    template: &str,
) -> Result<()> {
    let check = FileCheck::run(paths).await;
    let note = note.map(str::to_string).unwrap_or_else(|| check.note());
    let content = check.content(template);
    let report = check.report();

    if config.repo.is_none() {
        println!("No repository configured so no status report submitted.");
        println!("Report: {report}");
        println!("Note: {note}");
        println!("Content:\n{content}");
        return Ok(());
    }

    let store = open_store(config)?;
    Reporter::new(&store)
        .post(report_path, &content, report, Some(&note), Utc::now())
        .await
        .with_context(|| format!("Failed to post {report_path}"))?;
    println!("OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_paths_present() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("export.csv");
        std::fs::write(&file, "x").unwrap();

        let check = FileCheck::run(&[file.clone(), dir.path().to_path_buf()]).await;
        assert_eq!(check.report(), Report::Good);
        assert_eq!(check.note(), "all paths good");
        assert!(check.bad.is_empty());
    }

    #[tokio::test]
    async fn test_missing_path_is_bad() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present");
        std::fs::write(&present, "x").unwrap();
        let missing = dir.path().join("missing");

        let check = FileCheck::run(&[present, missing.clone()]).await;
        assert_eq!(check.report(), Report::Bad);
        assert_eq!(check.note(), "1 bad paths");
        assert_eq!(check.bad, vec![missing.display().to_string()]);
    }

    #[test]
    fn test_content_template() {
        let check = FileCheck {
            good: vec!["/a".to_string()],
            bad: vec!["/b".to_string(), "/c".to_string()],
        };
        assert_eq!(
            check.content(DEFAULT_TEMPLATE),
            "# File Check\n\n## Bad Paths\n  - /b\n  - /c\n\n## Good Paths\n  - /a\n"
        );
    }

    #[test]
    fn test_content_without_bad_paths() {
        let check = FileCheck {
            good: vec!["/a".to_string()],
            bad: vec![],
        };
        assert_eq!(
            check.content(DEFAULT_TEMPLATE),
            "# File Check\n\n## Good Paths\n  - /a\n"
        );
    }
}
