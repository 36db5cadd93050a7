//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Mock GitHub clients always carry a token and at most one retry so
//!   backoff never exceeds one second.
//! - `MemoryStore` records every commit for later assertions.
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::SecretString;
use vitals_client::{ArtifactSource, ArtifactStore, ClientError, GitHubClient, Result};
use vitals_engine::Location;

// Re-export commonly used types for test convenience
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client pointed at `server` with a token and one retry.
#[allow(dead_code)]
pub fn github_client(server: &MockServer) -> GitHubClient {
    GitHubClient::builder()
        .api_url(server.uri())
        .token(SecretString::new("test-token".to_string().into()))
        .max_retries(1)
        .build()
        .unwrap()
}

/// Body of a contents API response, base64 wrapped the way GitHub wraps it.
#[allow(dead_code)]
pub fn contents_body(text: &str, sha: &str) -> serde_json::Value {
    let encoded = STANDARD.encode(text);
    let wrapped = encoded
        .as_bytes()
        .chunks(60)
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect::<Vec<_>>()
        .join("\n");
    serde_json::json!({
        "type": "file",
        "encoding": "base64",
        "content": wrapped,
        "sha": sha,
    })
}

#[allow(dead_code)]
pub fn acme() -> Location {
    Location::GitHub {
        owner: "acme".to_string(),
        repo: "status".to_string(),
    }
}

#[allow(dead_code)]
pub fn local(path: &str) -> Location {
    Location::Local {
        path: PathBuf::from(path),
    }
}

/// In-memory store serving files keyed by `(location, path)`.
#[allow(dead_code)]
pub struct MemoryStore {
    pub location: Location,
    pub files: Mutex<BTreeMap<(Location, String), String>>,
    pub commits: Mutex<Vec<(Vec<(String, String)>, String)>>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            files: Mutex::new(BTreeMap::new()),
            commits: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, location: &Location, path: &str, text: &str) {
        self.files
            .lock()
            .unwrap()
            .insert((location.clone(), path.to_string()), text.to_string());
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(&(self.location.clone(), path.to_string()))
            .cloned()
    }

    pub fn commit_count(&self) -> usize {
        self.commits.lock().unwrap().len()
    }
}

impl ArtifactStore for MemoryStore {
    fn location(&self) -> Location {
        self.location.clone()
    }

    async fn fetch(&self, path: &str) -> Result<String> {
        self.fetch_at(&self.location, path).await
    }

    async fn put(&self, path: &str, text: &str, message: &str) -> Result<()> {
        self.commit(&[(path.to_string(), text.to_string())], message)
            .await
    }

    async fn commit(&self, files: &[(String, String)], message: &str) -> Result<()> {
        for (path, text) in files {
            self.insert(&self.location, path, text);
        }
        self.commits
            .lock()
            .unwrap()
            .push((files.to_vec(), message.to_string()));
        Ok(())
    }
}

impl ArtifactSource for MemoryStore {
    async fn fetch_at(&self, location: &Location, path: &str) -> Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(&(location.clone(), path.to_string()))
            .cloned()
            .ok_or_else(|| ClientError::NotFound(path.to_string()))
    }
}
