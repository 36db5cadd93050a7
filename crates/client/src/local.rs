//! Local git working tree used as an artifact store.
//!
//! Responsibilities:
//! - Read files relative to the working tree root.
//! - Write files, stage them and commit through the `git` executable.
//! - Push to the upstream when the repository has a remote.
//!
//! Does NOT handle:
//! - Cloning or initialising repositories.
//! - Conflict resolution when a push is rejected.
//!
//! Invariants:
//! - Paths are relative and never contain `..`, so nothing outside the
//!   working tree is read or written.
//! - A commit is skipped when staging produced no changes.

use std::path::{Component, Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};

/// Identity used when the repository has no `user.email` configured.
const FALLBACK_NAME: &str = "vitals";
const FALLBACK_EMAIL: &str = "vitals@localhost";

/// What to do when `git push` fails after a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushFailure {
    /// Return the push error to the caller.
    Fail,
    /// Log the error and report success; the commit stays local.
    Warn,
}

/// A git working tree on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalRepo {
    root: PathBuf,
    git: String,
}

impl LocalRepo {
    /// Open the working tree at `root`, driving it with the `git` executable.
    pub fn new(root: impl Into<PathBuf>, git: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            git: git.into(),
        }
    }

    /// Working tree root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let safe = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !safe {
            return Err(ClientError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }

    /// Read a file from the working tree.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` when the file does not exist.
    pub async fn read(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        match tokio::fs::read_to_string(&full).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ClientError::NotFound(path.to_string()))
            }
            Err(e) => Err(ClientError::Io(e)),
        }
    }

    /// Write, stage and commit `files`, then push if a remote exists.
    ///
    /// Returns `false` when the files already matched the index and nothing
    /// was committed.
    pub async fn commit_files(
        &self,
        files: &[(String, String)],
        message: &str,
        on_push_failure: PushFailure,
    ) -> Result<bool> {
        let mut staged = Vec::with_capacity(files.len());
        for (path, text) in files {
            let full = self.resolve(path)?;
            if let Some(parent) = full.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&full, text).await?;
            staged.push(path.as_str());
        }

        let mut add = vec!["add", "--"];
        add.extend(staged.iter().copied());
        self.git(&add).await?;

        if self.git_succeeds(&["diff", "--cached", "--quiet"]).await? {
            debug!(root = %self.root.display(), "No changes to commit");
            return Ok(false);
        }

        let mut commit: Vec<String> = Vec::new();
        if !self.git_succeeds(&["config", "user.email"]).await? {
            commit.extend([
                "-c".to_string(),
                format!("user.name={FALLBACK_NAME}"),
                "-c".to_string(),
                format!("user.email={FALLBACK_EMAIL}"),
            ]);
        }
        commit.extend(["commit".to_string(), "-m".to_string(), message.to_string()]);
        let commit: Vec<&str> = commit.iter().map(String::as_str).collect();
        self.git(&commit).await?;
        info!(root = %self.root.display(), files = files.len(), "Committed files");

        if self.git(&["remote"]).await?.trim().is_empty() {
            return Ok(true);
        }
        match self.git(&["push"]).await {
            Ok(_) => Ok(true),
            Err(e) if on_push_failure == PushFailure::Warn => {
                warn!(error = %e, "Push failed, commit kept locally");
                Ok(true)
            }
            Err(e) => Err(e),
        }
    }

    /// Run git and return stdout; a non-zero exit is an error.
    async fn git(&self, args: &[&str]) -> Result<String> {
        let output = self.command(args).output().await?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(ClientError::Git {
                command: args.join(" "),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    /// Run git for its exit status only.
    async fn git_succeeds(&self, args: &[&str]) -> Result<bool> {
        let output = self.command(args).output().await?;
        Ok(output.status.success())
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.git);
        command.arg("-C").arg(&self.root).args(args);
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rejects_escaping_paths() {
        let repo = LocalRepo::new("/srv/status", "git");
        assert!(matches!(
            repo.resolve("../secret.md"),
            Err(ClientError::InvalidPath(_))
        ));
        assert!(matches!(
            repo.resolve("/etc/passwd"),
            Err(ClientError::InvalidPath(_))
        ));
        assert!(matches!(repo.resolve(""), Err(ClientError::InvalidPath(_))));
    }

    #[test]
    fn test_resolve_joins_relative_paths() {
        let repo = LocalRepo::new("/srv/status", "git");
        assert_eq!(
            repo.resolve("jobs/nightly.md").unwrap(),
            PathBuf::from("/srv/status/jobs/nightly.md")
        );
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = LocalRepo::new(dir.path(), "git");
        let err = repo.read("absent.md").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err.fetch_description(),
            "error: (status_code=404) NOT FOUND"
        );
    }
}
