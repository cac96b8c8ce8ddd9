//! Error types for Solace
//!
//! This module defines the error taxonomy used throughout the crate,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Solace operations
///
/// Configuration and credential problems are fatal to the completion
/// gateway (never to the process). The remote failures (`Authentication`,
/// `RateLimited`, `ServiceUnavailable`, `Provider`) are per-request and
/// are classified by the gateway into an `ErrorKind`.
#[derive(Error, Debug)]
pub enum SolaceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// No credential could be found for the remote provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// Remote service rejected the credential (401/403)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Remote service reported rate or quota exhaustion (429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Remote service reported an internal failure (5xx)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Any other provider failure
    #[error("Provider error: {0}")]
    Provider(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type alias for Solace operations
///
/// Uses `anyhow::Error` so that context can be attached while the
/// underlying `SolaceError` stays available through `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = SolaceError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_missing_credentials_error_display() {
        let error = SolaceError::MissingCredentials("openai".to_string());
        assert_eq!(error.to_string(), "Missing credentials for provider: openai");
    }

    #[test]
    fn test_authentication_error_display() {
        let error = SolaceError::Authentication("invalid api key".to_string());
        assert_eq!(error.to_string(), "Authentication error: invalid api key");
    }

    #[test]
    fn test_rate_limited_error_display() {
        let error = SolaceError::RateLimited("quota exceeded".to_string());
        assert_eq!(error.to_string(), "Rate limited: quota exceeded");
    }

    #[test]
    fn test_service_unavailable_error_display() {
        let error = SolaceError::ServiceUnavailable("502 bad gateway".to_string());
        assert_eq!(error.to_string(), "Service unavailable: 502 bad gateway");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: SolaceError = io_error.into();
        assert!(matches!(error, SolaceError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: SolaceError = json_error.into();
        assert!(matches!(error, SolaceError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: SolaceError = yaml_error.into();
        assert!(matches!(error, SolaceError::Yaml(_)));
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = SolaceError::RateLimited("slow down".to_string()).into();
        assert!(matches!(
            err.downcast_ref::<SolaceError>(),
            Some(SolaceError::RateLimited(_))
        ));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SolaceError>();
    }
}
