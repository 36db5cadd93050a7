//! Single-file access through `/repos/{owner}/{repo}/contents/{path}`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::GitHubClient;
use crate::error::{ClientError, Result};
use crate::request::{send_request, send_request_with_retry};
use crate::url_encoding::encode_path;

/// A decoded file and the blob sha GitHub needs to overwrite it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub text: String,
    pub sha: String,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    content: Option<String>,
    sha: String,
}

#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

impl GitHubClient {
    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> String {
        format!(
            "{}/contents/{}",
            self.repo_url(owner, repo),
            encode_path(path.trim_start_matches('/'))
        )
    }

    /// Read a file from the configured branch.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::ApiError` with status 404 when the file does not
    /// exist, and `ClientError::InvalidResponse` when the path is a directory
    /// or the content is not base64-encoded UTF-8.
    pub async fn get_file(&self, owner: &str, repo: &str, path: &str) -> Result<FileContent> {
        let url = self.contents_url(owner, repo, path);
        debug!(%url, branch = %self.branch, "Fetching file contents");

        let builder = self
            .request(Method::GET, &url)
            .query(&[("ref", self.branch.as_str())]);
        let response = send_request_with_retry(builder, self.max_retries).await?;
        let body: ContentsResponse = response.json().await?;

        if let Some(kind) = body.kind.as_deref()
            && kind != "file"
        {
            return Err(ClientError::InvalidResponse(format!(
                "{path} is a {kind}, not a file"
            )));
        }
        match body.encoding.as_deref() {
            Some("base64") | None => {}
            Some(other) => {
                return Err(ClientError::InvalidResponse(format!(
                    "unsupported content encoding '{other}' for {path}"
                )));
            }
        }

        let text = decode_content(body.content.as_deref().unwrap_or_default())?;
        Ok(FileContent {
            text,
            sha: body.sha,
        })
    }

    /// Create or replace a single file with one commit on the branch.
    pub async fn put_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        text: &str,
        message: &str,
    ) -> Result<()> {
        self.require_token()?;

        let sha = match self.get_file(owner, repo, path).await {
            Ok(existing) => Some(existing.sha),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };
        debug!(path, creating = sha.is_none(), "Writing file contents");

        let payload = PutContentsRequest {
            message,
            content: STANDARD.encode(text.as_bytes()),
            branch: &self.branch,
            sha,
        };
        let url = self.contents_url(owner, repo, path);
        send_request(self.request(Method::PUT, &url).json(&payload)).await?;
        Ok(())
    }
}

/// GitHub wraps base64 content at 60 columns.
fn decode_content(content: &str) -> Result<String> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ClientError::InvalidResponse(format!("invalid base64 content: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| ClientError::InvalidResponse(format!("content is not UTF-8: {e}")))
}
