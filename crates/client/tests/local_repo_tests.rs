//! Local git working tree tests.
//!
//! Each test initialises a scratch repository with the system `git`. Tests
//! return early when no `git` executable is available.

mod common;

use std::path::Path;
use std::process::Command;

use vitals_client::{ArtifactStore, ClientError, LocalRepo, PushFailure};

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "git {args:?} failed");
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn init_repo(dir: &Path) {
    git(dir, &["init", "--quiet"]);
}

fn commit_count(dir: &Path) -> usize {
    git(dir, &["rev-list", "--count", "HEAD"]).trim().parse().unwrap()
}

#[tokio::test]
async fn test_put_writes_and_commits() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    let repo = LocalRepo::new(dir.path(), "git");

    repo.put("jobs/nightly.md", "hello\n", "Update jobs/nightly.md")
        .await
        .unwrap();

    assert_eq!(repo.fetch("jobs/nightly.md").await.unwrap(), "hello\n");
    assert_eq!(commit_count(dir.path()), 1);
    assert_eq!(
        git(dir.path(), &["log", "-1", "--format=%s"]).trim(),
        "Update jobs/nightly.md"
    );
}

#[tokio::test]
async fn test_unchanged_files_skip_commit() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    let repo = LocalRepo::new(dir.path(), "git");
    let files = vec![("a.md".to_string(), "same\n".to_string())];

    assert!(repo
        .commit_files(&files, "first", PushFailure::Fail)
        .await
        .unwrap());
    assert!(!repo
        .commit_files(&files, "second", PushFailure::Fail)
        .await
        .unwrap());
    assert_eq!(commit_count(dir.path()), 1);
}

#[tokio::test]
async fn test_commit_writes_several_files_at_once() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    init_repo(dir.path());
    let repo = LocalRepo::new(dir.path(), "git");

    repo.commit(
        &[
            ("summary.org".to_string(), "* OK\n".to_string()),
            ("summary.org.json".to_string(), "{}\n".to_string()),
        ],
        "Update summary files",
    )
    .await
    .unwrap();

    assert_eq!(commit_count(dir.path()), 1);
    let files = git(dir.path(), &["show", "--name-only", "--format=", "HEAD"]);
    assert!(files.contains("summary.org\n"));
    assert!(files.contains("summary.org.json"));
}

#[tokio::test]
async fn test_missing_git_binary_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = LocalRepo::new(dir.path(), "definitely-not-git-vitals");
    let err = repo.put("a.md", "x", "m").await.unwrap_err();
    assert!(matches!(err, ClientError::Io(_)));
}

#[tokio::test]
async fn test_git_failure_reports_command() {
    if !git_available() {
        return;
    }
    // Not a repository, so `git add` fails.
    let dir = tempfile::tempdir().unwrap();
    let repo = LocalRepo::new(dir.path().join("plain"), "git");
    std::fs::create_dir_all(dir.path().join("plain")).unwrap();

    let err = repo.put("a.md", "x", "m").await.unwrap_err();
    match err {
        ClientError::Git { command, .. } => assert!(command.starts_with("add")),
        other => panic!("expected Git error, got {other:?}"),
    }
}
