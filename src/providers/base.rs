//! Base provider trait and common types for Solace
//!
//! This module defines the Provider trait that remote completion services
//! implement, along with the role-tagged message type and the generation
//! parameters sent with every request.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Policy instructions for the remote model
    System,
    /// Text written by the end user
    User,
    /// Text produced by the model or by the session on its behalf
    Assistant,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single role-tagged message
///
/// Messages are immutable once created; the fields are only readable
/// through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    /// Creates a message with an explicit role
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use solace::providers::{Message, Role};
    ///
    /// let msg = Message::user("Hello");
    /// assert_eq!(msg.role(), Role::User);
    /// assert_eq!(msg.content(), "Hello");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a new assistant message
    ///
    /// # Examples
    ///
    /// ```
    /// use solace::providers::{Message, Role};
    ///
    /// let msg = Message::assistant("Hi there");
    /// assert_eq!(msg.role(), Role::Assistant);
    /// ```
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a new system message
    ///
    /// # Examples
    ///
    /// ```
    /// use solace::providers::{Message, Role};
    ///
    /// let msg = Message::system("Be kind");
    /// assert_eq!(msg.role(), Role::System);
    /// ```
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Role of the author
    pub fn role(&self) -> Role {
        self.role
    }

    /// Text of the message
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Sampling parameters sent with every completion request
///
/// Streaming is always disabled; the gateway expects one complete
/// response per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Nucleus sampling cutoff
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 500,
            top_p: 1.0,
        }
    }
}

/// Token usage information from a completion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: usize,
    /// Number of tokens in the completion
    pub completion_tokens: usize,
    /// Total tokens used (prompt + completion)
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use solace::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Completion response with generated text and optional token usage
///
/// `content` may be empty when the remote response was well-formed but
/// carried nothing usable; the gateway decides what to do with that.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Generated assistant text
    pub content: String,
    /// Optional token usage information
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a new CompletionResponse without usage data
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }

    /// Create a new CompletionResponse with token usage
    pub fn with_usage(content: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            content: content.into(),
            usage: Some(usage),
        }
    }
}

/// Provider trait for remote completion services
///
/// Implementations turn an ordered list of role-tagged messages into a
/// single completion. Failures are reported as `SolaceError` variants
/// wrapped in `anyhow::Error` so the gateway can classify them.
///
/// # Examples
///
/// ```no_run
/// use solace::providers::{CompletionResponse, GenerationParams, Message, Provider};
/// use solace::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     async fn complete(
///         &self,
///         messages: &[Message],
///         _params: &GenerationParams,
///     ) -> Result<CompletionResponse> {
///         let last = messages.last().map(|m| m.content()).unwrap_or_default();
///         Ok(CompletionResponse::new(last))
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Completes a conversation
    ///
    /// # Arguments
    ///
    /// * `messages` - Context window, system prompt first
    /// * `params` - Sampling parameters
    ///
    /// # Errors
    ///
    /// Returns error if the remote call fails or the response is malformed
    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<CompletionResponse>;

    /// Identifier of the model requests are sent to
    fn model(&self) -> String {
        "unknown".to_string()
    }
}
