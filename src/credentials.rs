//! Credential lookup and storage
//!
//! The remote provider needs exactly one secret. It is looked up in the
//! configuration first, then `SOLACE_API_KEY`, then (opt-in) the OS keyring.

use crate::config::ProviderConfig;
use crate::error::{Result, SolaceError};

/// Keyring service name
pub const KEYRING_SERVICE: &str = "solace";

/// Keyring account name under which the API key is stored
pub const KEYRING_ACCOUNT: &str = "api_key";

/// Environment variable consulted for the credential
pub const API_KEY_ENV: &str = "SOLACE_API_KEY";

/// Resolve the API key for the configured provider
///
/// Blank values are treated as absent. Keyring failures are logged and
/// treated as absent so that a broken secret service never takes the
/// process down.
///
/// # Examples
///
/// ```
/// use solace::config::ProviderConfig;
/// use solace::credentials::resolve_api_key;
///
/// let config = ProviderConfig {
///     api_key: Some("sk-from-config".to_string()),
///     ..ProviderConfig::default()
/// };
/// assert_eq!(resolve_api_key(&config).as_deref(), Some("sk-from-config"));
/// ```
pub fn resolve_api_key(config: &ProviderConfig) -> Option<String> {
    if let Some(key) = non_blank(config.api_key.clone()) {
        tracing::debug!("Using API key from configuration");
        return Some(key);
    }

    if let Some(key) = non_blank(std::env::var(API_KEY_ENV).ok()) {
        tracing::debug!("Using API key from {}", API_KEY_ENV);
        return Some(key);
    }

    if config.use_keyring {
        match read_keyring() {
            Ok(key) => {
                if let Some(key) = non_blank(Some(key)) {
                    tracing::debug!("Using API key from OS keyring");
                    return Some(key);
                }
            }
            Err(e) => tracing::warn!("Keyring lookup failed: {}", e),
        }
    }

    None
}

/// Store the API key in the OS keyring
///
/// # Errors
///
/// Returns error if the key is blank or the keyring rejects the write
pub fn store_api_key(api_key: &str) -> Result<()> {
    if api_key.trim().is_empty() {
        return Err(SolaceError::Config("API key cannot be empty".to_string()).into());
    }
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_ACCOUNT).map_err(SolaceError::from)?;
    entry
        .set_password(api_key.trim())
        .map_err(SolaceError::from)?;
    tracing::info!("Stored API key in OS keyring");
    Ok(())
}

fn read_keyring() -> std::result::Result<String, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, KEYRING_ACCOUNT)?.get_password()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
