//! Artifact store clients and dashboard orchestration for vitals.
//!
//! This crate reads and writes job reports in a GitHub repository (through
//! the REST contents and git data APIs) or in a local git working tree, and
//! drives dashboard passes on top of the pure `vitals-engine` core.

pub mod dashboard;
pub mod error;
pub mod github;
pub mod local;
pub mod notify;
pub mod reporter;
pub mod request;
pub mod store;
pub mod url_encoding;

pub use dashboard::Dashboard;
pub use error::{ClientError, Result};
pub use github::builder::GitHubClientBuilder;
pub use github::{FileContent, GitHubClient};
pub use local::{LocalRepo, PushFailure};
pub use notify::{ChatId, Notifier, NotifyConfig, TelegramConfig, WebhookConfig};
pub use reporter::Reporter;
pub use store::{ArtifactSource, ArtifactStore, GitHubStore, Sources, Store};
