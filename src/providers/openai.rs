//! OpenAI-compatible provider implementation for Solace
//!
//! This module implements the Provider trait for any service exposing the
//! `/chat/completions` endpoint (OpenAI, Groq, vLLM, llama.cpp server, ...).
//! HTTP status codes are mapped onto `SolaceError` variants so the gateway
//! can classify failures without looking at transport details.

use crate::config::ProviderConfig;
use crate::error::{Result, SolaceError};
use crate::providers::{CompletionResponse, GenerationParams, Message, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible chat completion provider
///
/// # Examples
///
/// ```no_run
/// use solace::config::ProviderConfig;
/// use solace::providers::{GenerationParams, Message, OpenAiProvider, Provider};
///
/// # async fn example() -> solace::error::Result<()> {
/// let provider = OpenAiProvider::new(ProviderConfig::default(), "sk-...".to_string())?;
/// let messages = vec![Message::system("Be kind"), Message::user("Hello!")];
/// let completion = provider.complete(&messages, &GenerationParams::default()).await?;
/// println!("{}", completion.content);
/// # Ok(())
/// # }
/// ```
pub struct OpenAiProvider {
    client: Client,
    config: ProviderConfig,
    api_key: String,
}

/// Request body for `/chat/completions`
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

/// Response body from `/chat/completions`
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

impl OpenAiProvider {
    /// Create a new provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Provider configuration (endpoint, model, timeout)
    /// * `api_key` - Resolved credential
    ///
    /// # Errors
    ///
    /// Returns error if the credential is blank or the HTTP client cannot
    /// be built
    pub fn new(config: ProviderConfig, api_key: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(SolaceError::MissingCredentials(config.provider_type.clone()).into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("solace/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SolaceError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized OpenAI-compatible provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Configured API base URL
    pub fn api_base(&self) -> &str {
        &self.config.api_base
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

/// Map a non-success HTTP status onto the error taxonomy
fn classify_status(status: StatusCode, body: &str) -> SolaceError {
    let detail = format!("{}: {}", status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SolaceError::Authentication(detail),
        StatusCode::TOO_MANY_REQUESTS => SolaceError::RateLimited(detail),
        s if s.is_server_error() => SolaceError::ServiceUnavailable(detail),
        _ => SolaceError::Provider(detail),
    }
}

fn parse_response(text: &str) -> Result<ChatResponse> {
    serde_json::from_str(text).map_err(|e| {
        tracing::error!("Failed to parse completion response: {}", e);
        SolaceError::Serialization(e).into()
    })
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<CompletionResponse> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
            stream: false,
        };

        tracing::debug!(
            "Sending completion request: {} messages, model={}",
            messages.len(),
            self.config.model
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Completion request failed: {}", e);
                SolaceError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Provider returned error {}", status);
            return Err(classify_status(status, &error_text).into());
        }

        let text = response.text().await.map_err(SolaceError::Http)?;
        let body = parse_response(&text)?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default();

        let response = match body.usage {
            Some(usage) => {
                let usage = TokenUsage::new(usage.prompt_tokens, usage.completion_tokens);
                tracing::debug!(
                    "Completion usage: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens,
                    usage.completion_tokens
                );
                CompletionResponse::with_usage(content, usage)
            }
            None => CompletionResponse::new(content),
        };

        Ok(response)
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}
