//! Multi-file commits through the git data API.
//!
//! A commit is built in six requests: read the branch ref, read the base
//! commit, create one blob per file, create a tree on top of the base tree,
//! create the commit, then fast-forward the ref. The ref update uses
//! `force: false`, so a concurrent push makes the commit fail instead of
//! discarding someone else's work.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::GitHubClient;
use crate::error::Result;
use crate::request::{send_request, send_request_with_retry};
use crate::url_encoding::encode_path;

#[derive(Debug, Deserialize)]
struct RefResponse {
    object: ShaRef,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    tree: ShaRef,
}

#[derive(Debug, Deserialize)]
struct ShaRef {
    sha: String,
}

#[derive(Debug, Serialize)]
struct CreateBlob<'a> {
    content: String,
    encoding: &'a str,
}

#[derive(Debug, Serialize)]
struct TreeEntry<'a> {
    path: &'a str,
    mode: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    sha: String,
}

#[derive(Debug, Serialize)]
struct CreateTree<'a> {
    base_tree: &'a str,
    tree: Vec<TreeEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct CreateCommit<'a> {
    message: &'a str,
    tree: &'a str,
    parents: [&'a str; 1],
}

#[derive(Debug, Serialize)]
struct UpdateRef<'a> {
    sha: &'a str,
    force: bool,
}

impl GitHubClient {
    /// Commit several files at once and return the new commit sha.
    ///
    /// `files` are `(path, text)` pairs relative to the repository root.
    pub async fn commit_files(
        &self,
        owner: &str,
        repo: &str,
        files: &[(String, String)],
        message: &str,
    ) -> Result<String> {
        self.require_token()?;
        let repo_url = self.repo_url(owner, repo);
        let branch_ref = encode_path(&self.branch);

        let head_url = format!("{repo_url}/git/ref/heads/{branch_ref}");
        let head: RefResponse = send_request_with_retry(
            self.request(Method::GET, &head_url),
            self.max_retries,
        )
        .await?
        .json()
        .await?;
        let parent = head.object.sha;

        let commit_url = format!("{repo_url}/git/commits/{parent}");
        let base: CommitResponse = send_request_with_retry(
            self.request(Method::GET, &commit_url),
            self.max_retries,
        )
        .await?
        .json()
        .await?;
        debug!(%parent, base_tree = %base.tree.sha, "Resolved branch head");

        let mut entries = Vec::with_capacity(files.len());
        for (path, text) in files {
            let blob = CreateBlob {
                content: STANDARD.encode(text.as_bytes()),
                encoding: "base64",
            };
            let created: ShaRef = send_request(
                self.request(Method::POST, &format!("{repo_url}/git/blobs"))
                    .json(&blob),
            )
            .await?
            .json()
            .await?;
            entries.push(TreeEntry {
                path: path.trim_start_matches('/'),
                mode: "100644",
                kind: "blob",
                sha: created.sha,
            });
        }

        let tree = CreateTree {
            base_tree: &base.tree.sha,
            tree: entries,
        };
        let tree: ShaRef = send_request(
            self.request(Method::POST, &format!("{repo_url}/git/trees"))
                .json(&tree),
        )
        .await?
        .json()
        .await?;

        let commit = CreateCommit {
            message,
            tree: &tree.sha,
            parents: [parent.as_str()],
        };
        let commit: ShaRef = send_request(
            self.request(Method::POST, &format!("{repo_url}/git/commits"))
                .json(&commit),
        )
        .await?
        .json()
        .await?;

        let update = UpdateRef {
            sha: &commit.sha,
            force: false,
        };
        send_request(
            self.request(
                Method::PATCH,
                &format!("{repo_url}/git/refs/heads/{branch_ref}"),
            )
            .json(&update),
        )
        .await?;

        info!(
            commit = %commit.sha,
            files = files.len(),
            branch = %self.branch,
            "Committed files"
        );
        Ok(commit.sha)
    }
}
