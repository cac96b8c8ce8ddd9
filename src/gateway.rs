//! Completion gateway
//!
//! Wraps the remote provider and normalizes every outcome into a
//! `CompletionResult`. The gateway never retries and never returns an
//! error to its caller: failures come back as a classified `ErrorKind`.
//!
//! The gateway is built once at startup from configuration. Without a
//! credential it is permanently disabled and reports why through
//! `configuration_error`; callers check `is_ready` before submitting.

use crate::config::Config;
use crate::credentials;
use crate::error::SolaceError;
use crate::prompts;
use crate::providers::{self, GenerationParams, Message, Provider};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Classified failure of a single completion request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Remote reported rate or quota exhaustion
    RateLimited,
    /// Remote rejected the credential
    Unauthorized,
    /// Remote reported an internal failure
    ServiceUnavailable,
    /// Anything else, including network failures
    Unknown,
}

impl ErrorKind {
    /// User-facing explanation appended to the conversation
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::RateLimited => prompts::RATE_LIMITED_GUIDANCE,
            Self::Unauthorized => prompts::UNAUTHORIZED_GUIDANCE,
            Self::ServiceUnavailable => prompts::SERVICE_UNAVAILABLE_GUIDANCE,
            Self::Unknown => prompts::UNKNOWN_FAILURE_GUIDANCE,
        }
    }

    /// Classify a provider error
    ///
    /// # Examples
    ///
    /// ```
    /// use solace::error::SolaceError;
    /// use solace::gateway::ErrorKind;
    ///
    /// let err: anyhow::Error = SolaceError::RateLimited("429".to_string()).into();
    /// assert_eq!(ErrorKind::from_error(&err), ErrorKind::RateLimited);
    /// ```
    pub fn from_error(err: &anyhow::Error) -> Self {
        if let Some(solace_err) = err.downcast_ref::<SolaceError>() {
            return match solace_err {
                SolaceError::RateLimited(_) => Self::RateLimited,
                SolaceError::Authentication(_) | SolaceError::MissingCredentials(_) => {
                    Self::Unauthorized
                }
                SolaceError::ServiceUnavailable(_) => Self::ServiceUnavailable,
                SolaceError::Http(e) => Self::from_reqwest(e),
                _ => Self::Unknown,
            };
        }

        if let Some(e) = err.downcast_ref::<reqwest::Error>() {
            return Self::from_reqwest(e);
        }

        Self::Unknown
    }

    fn from_reqwest(err: &reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status.as_u16() == 401 || status.as_u16() == 403 => Self::Unauthorized,
            Some(status) if status.as_u16() == 429 => Self::RateLimited,
            Some(status) if status.is_server_error() => Self::ServiceUnavailable,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate limited"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::ServiceUnavailable => write!(f, "service unavailable"),
            Self::Unknown => write!(f, "unknown error"),
        }
    }
}

/// Outcome of one completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// Generated assistant content
    Success(String),
    /// Classified failure
    Failure(ErrorKind),
}

impl CompletionResult {
    /// The assistant message this result contributes to history
    ///
    /// # Examples
    ///
    /// ```
    /// use solace::gateway::{CompletionResult, ErrorKind};
    ///
    /// let msg = CompletionResult::Failure(ErrorKind::RateLimited).into_message();
    /// assert!(msg.content().contains("try again shortly"));
    /// ```
    pub fn into_message(self) -> Message {
        match self {
            Self::Success(content) => Message::assistant(content),
            Self::Failure(kind) => Message::assistant(kind.guidance()),
        }
    }

    /// The failure kind, if any
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success(_) => None,
            Self::Failure(kind) => Some(*kind),
        }
    }
}

enum GatewayState {
    Ready(Arc<dyn Provider>),
    Disabled { reason: String },
}

/// Gateway to the remote completion service
pub struct CompletionGateway {
    state: GatewayState,
    params: GenerationParams,
}

impl CompletionGateway {
    /// Create a ready gateway around an existing provider
    pub fn new(provider: Arc<dyn Provider>, params: GenerationParams) -> Self {
        Self {
            state: GatewayState::Ready(provider),
            params,
        }
    }

    /// Create a permanently disabled gateway
    pub fn disabled(reason: impl Into<String>) -> Self {
        Self {
            state: GatewayState::Disabled {
                reason: reason.into(),
            },
            params: GenerationParams::default(),
        }
    }

    /// Build the gateway from configuration
    ///
    /// Never fails: a missing credential or a provider that cannot be
    /// constructed yields a disabled gateway carrying the reason.
    pub fn from_config(config: &Config) -> Self {
        let params = config.generation.params();

        let Some(api_key) = credentials::resolve_api_key(&config.provider) else {
            let reason = SolaceError::MissingCredentials(format!(
                "{} (set provider.api_key or {})",
                config.provider.provider_type,
                credentials::API_KEY_ENV
            ))
            .to_string();
            tracing::warn!("Completion gateway disabled: {}", reason);
            return Self::disabled(reason);
        };

        match providers::create_provider(&config.provider, api_key) {
            Ok(provider) => {
                tracing::info!("Completion gateway ready: model={}", provider.model());
                Self::new(provider, params)
            }
            Err(e) => {
                tracing::warn!("Completion gateway disabled: {}", e);
                Self::disabled(e.to_string())
            }
        }
    }

    /// Whether requests can be sent
    pub fn is_ready(&self) -> bool {
        matches!(self.state, GatewayState::Ready(_))
    }

    /// Reason the gateway is disabled, if it is
    pub fn configuration_error(&self) -> Option<&str> {
        match &self.state {
            GatewayState::Ready(_) => None,
            GatewayState::Disabled { reason } => Some(reason),
        }
    }

    /// Sampling parameters sent with each request
    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Request a completion for `messages`
    ///
    /// Success with empty or whitespace-only content is replaced by a
    /// fallback apology rather than reported as a failure.
    pub async fn complete(&self, messages: &[Message]) -> CompletionResult {
        let provider = match &self.state {
            GatewayState::Ready(provider) => provider,
            GatewayState::Disabled { reason } => {
                tracing::warn!("Completion requested from disabled gateway: {}", reason);
                return CompletionResult::Failure(ErrorKind::Unauthorized);
            }
        };

        match provider.complete(messages, &self.params).await {
            Ok(response) if response.content.trim().is_empty() => {
                tracing::warn!("Provider returned empty content, using fallback reply");
                CompletionResult::Success(prompts::EMPTY_COMPLETION_FALLBACK.to_string())
            }
            Ok(response) => CompletionResult::Success(response.content),
            Err(e) => {
                let kind = ErrorKind::from_error(&e);
                tracing::error!(error_kind = %kind, "Completion failed: {:#}", e);
                CompletionResult::Failure(kind)
            }
        }
    }
}

impl fmt::Debug for CompletionGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionGateway")
            .field("ready", &self.is_ready())
            .field("configuration_error", &self.configuration_error())
            .field("params", &self.params)
            .finish()
    }
}
