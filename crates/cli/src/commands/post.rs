//! Post command implementation.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use vitals_client::Reporter;
use vitals_config::Config;
use vitals_engine::Report;

use super::open_store;

/// Report body from `--content` or `--content-file` (`-` reads stdin).
pub fn read_content(content: Option<String>, content_file: Option<&Path>) -> Result<String> {
    match (content, content_file) {
        (Some(content), _) => Ok(content),
        (None, Some(path)) if path == Path::new("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read report body from stdin")?;
            Ok(buf)
        }
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        (None, None) => Ok(String::new()),
    }
}

pub async fn run(
    config: &Config,
    path: &str,
    content: Option<String>,
    content_file: Option<PathBuf>,
    report: Report,
    note: Option<&str>,
) -> Result<()> {
    let content = read_content(content, content_file.as_deref())?;
    let store = open_store(config)?;

    Reporter::new(&store)
        .post(path, &content, report, note, Utc::now())
        .await
        .with_context(|| format!("Failed to post {path}"))?;

    println!("OK");
    Ok(())
}
