//! Artifact stores: where job reports and dashboard files live.
//!
//! Responsibilities:
//! - Define [`ArtifactStore`], the read/write seam used by the reporter and
//!   the dashboard pass.
//! - Bind a [`GitHubClient`] to one repository, or wrap a [`LocalRepo`].
//! - Define [`ArtifactSource`] for reading jobs that live in other locations.
//!
//! Does NOT handle:
//! - Metadata encoding or status resolution (see `vitals-engine`).
//!
//! Invariants:
//! - `put` commits a single file; `commit` writes several files in one commit.
//! - A failed push is fatal for `put` and only logged for `commit`.

use tracing::debug;
use vitals_config::Config;
use vitals_engine::Location;

use crate::error::{ClientError, Result};
use crate::github::GitHubClient;
use crate::local::{LocalRepo, PushFailure};

/// Read and write access to one repository.
#[allow(async_fn_in_trait)]
pub trait ArtifactStore {
    /// Where this store reads and writes.
    fn location(&self) -> Location;

    /// Read a file.
    async fn fetch(&self, path: &str) -> Result<String>;

    /// Create or replace a single file with its own commit.
    async fn put(&self, path: &str, text: &str, message: &str) -> Result<()>;

    /// Write several `(path, text)` files in one commit.
    async fn commit(&self, files: &[(String, String)], message: &str) -> Result<()>;

    /// Human-readable name for log lines and CLI output.
    fn describe(&self) -> String {
        self.location().to_string()
    }
}

/// Reads artifacts from any location a tracked job may name.
#[allow(async_fn_in_trait)]
pub trait ArtifactSource {
    async fn fetch_at(&self, location: &Location, path: &str) -> Result<String>;
}

/// A [`GitHubClient`] bound to `owner/repo`.
#[derive(Debug, Clone)]
pub struct GitHubStore {
    client: GitHubClient,
    owner: String,
    repo: String,
}

impl GitHubStore {
    pub fn new(client: GitHubClient, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }
}

impl ArtifactStore for GitHubStore {
    fn location(&self) -> Location {
        Location::GitHub {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
        }
    }

    async fn fetch(&self, path: &str) -> Result<String> {
        Ok(self.client.get_file(&self.owner, &self.repo, path).await?.text)
    }

    async fn put(&self, path: &str, text: &str, message: &str) -> Result<()> {
        self.client
            .put_file(&self.owner, &self.repo, path, text, message)
            .await
    }

    async fn commit(&self, files: &[(String, String)], message: &str) -> Result<()> {
        self.client
            .commit_files(&self.owner, &self.repo, files, message)
            .await
            .map(|_| ())
    }

    fn describe(&self) -> String {
        format!("{}/{} ({})", self.owner, self.repo, self.client.branch())
    }
}

impl ArtifactStore for LocalRepo {
    fn location(&self) -> Location {
        Location::Local {
            path: self.root().to_path_buf(),
        }
    }

    async fn fetch(&self, path: &str) -> Result<String> {
        self.read(path).await
    }

    async fn put(&self, path: &str, text: &str, message: &str) -> Result<()> {
        let files = [(path.to_string(), text.to_string())];
        self.commit_files(&files, message, PushFailure::Fail)
            .await
            .map(|_| ())
    }

    async fn commit(&self, files: &[(String, String)], message: &str) -> Result<()> {
        self.commit_files(files, message, PushFailure::Warn)
            .await
            .map(|_| ())
    }
}

/// The store selected by a [`Location`].
#[derive(Debug, Clone)]
pub enum Store {
    GitHub(GitHubStore),
    Local(LocalRepo),
}

impl Store {
    /// Open the store for `location` with the connection settings in `config`.
    pub fn open(location: &Location, config: &Config) -> Result<Self> {
        debug!(%location, "Opening artifact store");
        match location {
            Location::GitHub { owner, repo } => {
                let client = GitHubClient::builder().from_config(config).build()?;
                Ok(Self::GitHub(GitHubStore::new(client, owner, repo)))
            }
            Location::Local { path } => Ok(Self::Local(LocalRepo::new(
                path.clone(),
                config.connection.git.clone(),
            ))),
        }
    }
}

impl ArtifactStore for Store {
    fn location(&self) -> Location {
        match self {
            Self::GitHub(store) => store.location(),
            Self::Local(store) => store.location(),
        }
    }

    async fn fetch(&self, path: &str) -> Result<String> {
        match self {
            Self::GitHub(store) => store.fetch(path).await,
            Self::Local(store) => store.fetch(path).await,
        }
    }

    async fn put(&self, path: &str, text: &str, message: &str) -> Result<()> {
        match self {
            Self::GitHub(store) => store.put(path, text, message).await,
            Self::Local(store) => store.put(path, text, message).await,
        }
    }

    async fn commit(&self, files: &[(String, String)], message: &str) -> Result<()> {
        match self {
            Self::GitHub(store) => store.commit(files, message).await,
            Self::Local(store) => store.commit(files, message).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::GitHub(store) => store.describe(),
            Self::Local(store) => store.describe(),
        }
    }
}

impl ArtifactSource for Store {
    async fn fetch_at(&self, location: &Location, path: &str) -> Result<String> {
        if *location == self.location() {
            self.fetch(path).await
        } else {
            Err(ClientError::UnsupportedLocation(location.to_string()))
        }
    }
}

/// Reads from every GitHub repository through one client, and from any
/// local working tree.
#[derive(Debug, Clone)]
pub struct Sources {
    github: GitHubClient,
    git: String,
}

impl Sources {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            github: GitHubClient::builder().from_config(config).build()?,
            git: config.connection.git.clone(),
        })
    }
}

impl ArtifactSource for Sources {
    async fn fetch_at(&self, location: &Location, path: &str) -> Result<String> {
        match location {
            Location::GitHub { owner, repo } => {
                Ok(self.github.get_file(owner, repo, path).await?.text)
            }
            Location::Local { path: root } => {
                LocalRepo::new(root.clone(), self.git.clone()).read(path).await
            }
        }
    }
}
