//! Property-based tests for configuration building.
//!
//! Test coverage:
//! - Valid API URLs build and lose only their trailing slash.
//! - Timeout and retry bounds are enforced for every value.
//! - ConnectionConfig survives a JSON roundtrip.

use proptest::prelude::*;
use std::time::Duration;

use vitals_config::constants::{MAX_MAX_RETRIES, MAX_TIMEOUT_SECS};
use vitals_config::{ConfigError, ConfigLoader, ConnectionConfig};

/// Strategy for generating valid API URLs, optionally with a path and trailing slash.
fn api_url_strategy() -> impl Strategy<Value = String> {
    let host = prop_oneof![
        Just("api.github.com"),
        Just("ghe.example.com"),
        Just("localhost"),
    ];
    let path = prop_oneof![Just(""), Just("/api/v3")];
    let slash = prop_oneof![Just(""), Just("/")];
    (prop_oneof![Just("http"), Just("https")], host, path, slash)
        .prop_map(|(scheme, host, path, slash)| format!("{scheme}://{host}{path}{slash}"))
}

proptest! {
    #[test]
    fn prop_valid_api_urls_build(url in api_url_strategy()) {
        let config = ConfigLoader::new().with_api_url(url.clone()).build().unwrap();
        prop_assert!(!config.connection.api_url.ends_with('/'));
        prop_assert_eq!(config.connection.api_url, url.trim_end_matches('/'));
    }

    #[test]
    fn prop_timeout_bounds(secs in 0u64..=2 * MAX_TIMEOUT_SECS) {
        let result = ConfigLoader::new()
            .with_timeout(Duration::from_secs(secs))
            .build();
        if secs == 0 || secs > MAX_TIMEOUT_SECS {
            prop_assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })), "expected InvalidTimeout for secs={}", secs);
        } else {
            prop_assert_eq!(result.unwrap().connection.timeout.as_secs(), secs);
        }
    }

    #[test]
    fn prop_max_retries_bounds(retries in 0usize..=3 * MAX_MAX_RETRIES) {
        let result = ConfigLoader::new().with_max_retries(retries).build();
        prop_assert_eq!(result.is_ok(), retries <= MAX_MAX_RETRIES);
    }

    #[test]
    fn prop_connection_config_json_roundtrip(
        url in api_url_strategy(),
        branch in "[a-z][a-z0-9-]{0,20}",
        timeout in 1u64..=MAX_TIMEOUT_SECS,
        retries in 0usize..=MAX_MAX_RETRIES,
    ) {
        let connection = ConnectionConfig {
            api_url: url,
            branch,
            timeout: Duration::from_secs(timeout),
            max_retries: retries,
            git: "git".to_string(),
        };
        let json = serde_json::to_string(&connection).unwrap();
        let back: ConnectionConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, connection);
    }
}
