//! Configuration management for Solace
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use anyhow::Context;
use crate::error::{Result, SolaceError};
use crate::providers::GenerationParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Provider types understood by `providers::create_provider`
pub const VALID_PROVIDERS: &[&str] = &["openai"];

/// Main configuration structure for Solace
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote completion provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Sampling parameters sent with every request
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Conversation session settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model identifier sent with each request
    #[serde(default = "default_model")]
    pub model: String,

    /// Credential for the remote service
    ///
    /// Usually left unset in files; see `credentials::resolve_api_key`
    /// for the other places it is looked up.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Whether to consult the OS keyring for the credential
    #[serde(default)]
    pub use_keyring: bool,

    /// HTTP timeout for a single completion request (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_provider_type() -> String {
    "openai".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            api_base: default_api_base(),
            model: default_model(),
            api_key: None,
            use_keyring: false,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Sampling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens in a single reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Nucleus sampling cutoff
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

fn default_top_p() -> f32 {
    1.0
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
        }
    }
}

impl GenerationConfig {
    /// Parameters in the form providers consume
    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
        }
    }
}

/// Conversation session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of most recent history messages sent upstream
    #[serde(default = "default_context_window")]
    pub context_window: usize,
}

fn default_context_window() -> usize {
    10
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            context_window: default_context_window(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json_format: bool,

    /// Optional file that receives a copy of every log line
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

fn default_log_level() -> String {
    "solace=warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if an existing file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(SolaceError::from)
            .with_context(|| format!("Failed to read config file {}", path))?;
        let config = serde_yaml::from_str(&contents)
            .map_err(SolaceError::from)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("SOLACE_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(api_base) = std::env::var("SOLACE_API_BASE") {
            self.provider.api_base = api_base;
        }

        if let Ok(model) = std::env::var("SOLACE_MODEL") {
            self.provider.model = model;
        }

        if let Ok(api_key) = std::env::var("SOLACE_API_KEY") {
            if !api_key.trim().is_empty() {
                self.provider.api_key = Some(api_key);
            }
        }

        if let Ok(window) = std::env::var("SOLACE_CONTEXT_WINDOW") {
            match window.parse::<usize>() {
                Ok(v) => {
                    self.session.context_window = v;
                    tracing::debug!(context_window = v, "Env override: SOLACE_CONTEXT_WINDOW");
                }
                Err(_) => tracing::warn!("Invalid SOLACE_CONTEXT_WINDOW: {}", window),
            }
        }

        if let Ok(temperature) = std::env::var("SOLACE_TEMPERATURE") {
            match temperature.parse::<f32>() {
                Ok(v) => self.generation.temperature = v,
                Err(_) => tracing::warn!("Invalid SOLACE_TEMPERATURE: {}", temperature),
            }
        }

        if let Ok(max_tokens) = std::env::var("SOLACE_MAX_TOKENS") {
            match max_tokens.parse::<u32>() {
                Ok(v) => self.generation.max_tokens = v,
                Err(_) => tracing::warn!("Invalid SOLACE_MAX_TOKENS: {}", max_tokens),
            }
        }

        if let Ok(level) = std::env::var("SOLACE_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            self.logging.level = "solace=debug".to_string();
        }
    }

    /// Validate the configuration
    ///
    /// A missing credential is not a validation failure; it leaves the
    /// completion gateway disabled instead.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if !VALID_PROVIDERS.contains(&self.provider.provider_type.as_str()) {
            return Err(SolaceError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                VALID_PROVIDERS.join(", ")
            ))
            .into());
        }

        if self.provider.model.trim().is_empty() {
            return Err(SolaceError::Config("provider.model cannot be empty".to_string()).into());
        }

        if self.provider.timeout_seconds == 0 {
            return Err(SolaceError::Config(
                "provider.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.session.context_window == 0 {
            return Err(SolaceError::Config(
                "session.context_window must be greater than 0".to_string(),
            )
            .into());
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(SolaceError::Config(
                "generation.temperature must be between 0.0 and 2.0".to_string(),
            )
            .into());
        }

        if self.generation.top_p <= 0.0 || self.generation.top_p > 1.0 {
            return Err(SolaceError::Config(
                "generation.top_p must be in (0.0, 1.0]".to_string(),
            )
            .into());
        }

        if self.generation.max_tokens == 0 {
            return Err(SolaceError::Config(
                "generation.max_tokens must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
