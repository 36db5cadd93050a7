//! Basic loader tests: defaults and builder overrides.

use std::time::Duration;

use secrecy::ExposeSecret;

use crate::loader::builder::ConfigLoader;

#[test]
fn test_loader_defaults() {
    let config = ConfigLoader::new().build().unwrap();
    assert_eq!(config.connection.api_url, "https://api.github.com");
    assert_eq!(config.connection.branch, "main");
    assert_eq!(config.connection.timeout, Duration::from_secs(30));
    assert_eq!(config.connection.max_retries, 3);
    assert_eq!(config.connection.git, "git");
    assert!(config.token.is_none());
    assert!(config.repo.is_none());
}

#[test]
fn test_loader_with_overrides() {
    let config = ConfigLoader::new()
        .with_token("ghp_test".to_string())
        .with_owner("acme".to_string())
        .with_repo("status".to_string())
        .with_api_url("https://ghe.example.com/api/v3/".to_string())
        .with_branch("reports".to_string())
        .with_git("/usr/local/bin/git".to_string())
        .with_timeout(Duration::from_secs(5))
        .with_max_retries(0)
        .build()
        .unwrap();

    assert_eq!(config.token.unwrap().expose_secret(), "ghp_test");
    assert_eq!(config.owner.as_deref(), Some("acme"));
    assert_eq!(config.repo.as_deref(), Some("status"));
    assert_eq!(config.connection.api_url, "https://ghe.example.com/api/v3");
    assert_eq!(config.connection.branch, "reports");
    assert_eq!(config.connection.git, "/usr/local/bin/git");
    assert_eq!(config.connection.timeout, Duration::from_secs(5));
    assert_eq!(config.connection.max_retries, 0);
}

#[test]
fn test_blank_owner_and_repo_are_unset() {
    let config = ConfigLoader::new()
        .with_owner("  ".to_string())
        .with_repo("".to_string())
        .build()
        .unwrap();
    assert!(config.owner.is_none());
    assert!(config.repo.is_none());
}

#[test]
fn test_token_is_redacted_in_debug_output() {
    let config = ConfigLoader::new()
        .with_token("ghp_very_secret".to_string())
        .build()
        .unwrap();
    assert!(!format!("{config:?}").contains("ghp_very_secret"));
}
