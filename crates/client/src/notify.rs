//! Outbound notifications for dashboard changes.
//!
//! Responsibilities:
//! - Parse the provider mapping passed on the command line, e.g.
//!   `{"telegram": {"token": "...", "chat_id": 123}, "webhook": {"url": "..."}}`.
//! - Deliver one plain-text message per change to every configured provider.
//!
//! Does NOT handle:
//! - Composing messages (see `Change::message` in `vitals-engine`).
//!
//! Invariants:
//! - Unknown providers are rejected when parsing.
//! - Delivery is fire and forget: [`Notifier::broadcast`] logs failures and
//!   never returns them.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vitals_config::constants::{DEFAULT_TELEGRAM_API_URL, DEFAULT_TIMEOUT_SECS, USER_AGENT};

use crate::error::{ClientError, Result};
use crate::request::send_request;

/// Deserialize a `SecretString` from a plain string.
mod secret_string {
    use secrecy::SecretString;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

fn default_telegram_api_url() -> String {
    DEFAULT_TELEGRAM_API_URL.to_string()
}

/// Provider name to provider settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifyConfig {
    #[serde(default)]
    pub telegram: Option<TelegramConfig>,
    #[serde(default)]
    pub webhook: Option<WebhookConfig>,
}

impl NotifyConfig {
    /// Parse the JSON mapping given to `--notify`.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ClientError::InvalidNotifyConfig(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.telegram.is_none() && self.webhook.is_none()
    }
}

/// Telegram chats are addressed by numeric id or `@channel` name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Name(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    #[serde(deserialize_with = "secret_string::deserialize")]
    pub token: SecretString,
    pub chat_id: ChatId,
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookConfig {
    pub url: String,
}

#[derive(Debug, Serialize)]
struct TelegramMessage<'a> {
    chat_id: &'a ChatId,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    text: &'a str,
}

/// Sends messages to the configured providers.
#[derive(Debug, Clone)]
pub struct Notifier {
    http: reqwest::Client,
    config: NotifyConfig,
}

impl Notifier {
    pub fn new(config: NotifyConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http, config })
    }

    /// Send `message` to every provider, stopping at the first failure.
    pub async fn send(&self, message: &str) -> Result<()> {
        if let Some(telegram) = &self.config.telegram {
            let url = format!(
                "{}/bot{}/sendMessage",
                telegram.api_url.trim_end_matches('/'),
                telegram.token.expose_secret()
            );
            let body = TelegramMessage {
                chat_id: &telegram.chat_id,
                text: message,
            };
            send_request(self.http.post(url).json(&body))
                .await
                .map_err(redact_telegram_url)?;
            debug!("Sent telegram notification");
        }
        if let Some(webhook) = &self.config.webhook {
            let body = WebhookMessage { text: message };
            send_request(self.http.post(&webhook.url).json(&body)).await?;
            debug!(url = %webhook.url, "Sent webhook notification");
        }
        Ok(())
    }

    /// Send each message, logging failures instead of returning them.
    ///
    /// Returns the number of messages delivered to every provider.
    pub async fn broadcast(&self, messages: &[String]) -> usize {
        let mut delivered = 0;
        for message in messages {
            match self.send(message).await {
                Ok(()) => delivered += 1,
                Err(e) => warn!(error = %e, "Notification failed"),
            }
        }
        delivered
    }
}

/// The bot token is part of the Telegram URL; keep it out of error text.
fn redact_telegram_url(error: ClientError) -> ClientError {
    match error {
        ClientError::ApiError {
            status,
            message,
            request_id,
            ..
        } => ClientError::ApiError {
            status,
            url: "telegram sendMessage".to_string(),
            message,
            request_id,
        },
        ClientError::HttpError(e) => ClientError::HttpError(e.without_url()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_providers() {
        let config = NotifyConfig::from_json(
            r#"{"telegram": {"token": "123:abc", "chat_id": 42}, "webhook": {"url": "https://hooks.example.com/x"}}"#,
        )
        .unwrap();
        let telegram = config.telegram.unwrap();
        assert_eq!(telegram.chat_id, ChatId::Id(42));
        assert_eq!(telegram.api_url, "https://api.telegram.org");
        assert_eq!(telegram.token.expose_secret(), "123:abc");
        assert_eq!(config.webhook.unwrap().url, "https://hooks.example.com/x");
    }

    #[test]
    fn test_parse_channel_name() {
        let config =
            NotifyConfig::from_json(r#"{"telegram": {"token": "t", "chat_id": "@ops"}}"#).unwrap();
        assert_eq!(
            config.telegram.unwrap().chat_id,
            ChatId::Name("@ops".to_string())
        );
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = NotifyConfig::from_json(r#"{"slack": {"url": "x"}}"#).unwrap_err();
        assert!(matches!(err, ClientError::InvalidNotifyConfig(_)));
        assert!(err.to_string().starts_with("Invalid notify config: "));
        assert!(err.to_string().contains("slack"));

        let err = NotifyConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ClientError::InvalidNotifyConfig(_)));
    }

    #[test]
    fn test_empty_config() {
        assert!(NotifyConfig::from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let config =
            NotifyConfig::from_json(r#"{"telegram": {"token": "sekrit", "chat_id": 1}}"#).unwrap();
        assert!(!format!("{config:?}").contains("sekrit"));
    }
}
