//! Test utilities for Solace
//!
//! Temporary files, configuration fixtures, and scripted providers that
//! stand in for the remote completion service.

use crate::config::Config;
use crate::error::Result;
use crate::providers::{CompletionResponse, GenerationParams, Message, Provider};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;
use tokio::sync::Notify;

/// Create a temporary directory that is removed when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Write `content` to `name` inside `dir` and return its path
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that a result failed with a message containing `expected`
///
/// # Panics
///
/// Panics if the result is Ok or the message does not match
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = format!("{:#}", e);
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Default configuration with a dummy credential
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.provider.api_key = Some("sk-test".to_string());
    config
}

/// Complete configuration file covering every section
pub fn test_config_yaml() -> String {
    r#"
provider:
  type: openai
  api_base: http://localhost:9999/v1
  model: gpt-4o-mini
  timeout_seconds: 5

generation:
  temperature: 0.5
  max_tokens: 200
  top_p: 0.9

session:
  context_window: 6

logging:
  level: solace=info
  json_format: true
"#
    .to_string()
}

/// Provider that always answers with the same content
///
/// Records how often it was called and the last message list it saw.
pub struct StaticProvider {
    reply: String,
    calls: AtomicUsize,
    last_messages: Mutex<Vec<Message>>,
}

impl StaticProvider {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_messages(&self) -> Vec<Message> {
        self.last_messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for StaticProvider {
    async fn complete(
        &self,
        messages: &[Message],
        _params: &GenerationParams,
    ) -> Result<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages.to_vec();
        Ok(CompletionResponse::new(self.reply.clone()))
    }

    fn model(&self) -> String {
        "static".to_string()
    }
}

/// Provider that fails every request with an error built by `make_error`
pub struct FailingProvider<F> {
    make_error: F,
}

impl<F> FailingProvider<F>
where
    F: Fn() -> anyhow::Error + Send + Sync,
{
    pub fn new(make_error: F) -> Self {
        Self { make_error }
    }
}

#[async_trait]
impl<F> Provider for FailingProvider<F>
where
    F: Fn() -> anyhow::Error + Send + Sync,
{
    async fn complete(
        &self,
        _messages: &[Message],
        _params: &GenerationParams,
    ) -> Result<CompletionResponse> {
        Err((self.make_error)())
    }
}

/// Provider that blocks each request until `release` is called
///
/// Lets tests observe a session while its request is in flight.
pub struct GatedProvider {
    reply: String,
    called: Notify,
    gate: Notify,
}

impl GatedProvider {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            called: Notify::new(),
            gate: Notify::new(),
        }
    }

    /// Wait until a request has reached the provider
    pub async fn wait_for_call(&self) {
        self.called.notified().await;
    }

    /// Let the blocked request finish
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl Provider for GatedProvider {
    async fn complete(
        &self,
        _messages: &[Message],
        _params: &GenerationParams,
    ) -> Result<CompletionResponse> {
        self.called.notify_one();
        self.gate.notified().await;
        Ok(CompletionResponse::new(self.reply.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolaceError;

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<()> = Err(SolaceError::Config("test error message".to_string()).into());
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        assert_error_contains(Ok(()), "error");
    }

    #[test]
    fn test_test_config_is_valid() {
        let config = test_config();
        assert_eq!(config.provider.provider_type, "openai");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_test_config_yaml_parses() {
        let config: Config = serde_yaml::from_str(&test_config_yaml()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.session.context_window, 6);
        assert!(config.logging.json_format);
    }

    #[tokio::test]
    async fn test_static_provider_records_calls() {
        let provider = StaticProvider::new("hi");
        let response = provider
            .complete(&[Message::user("hello")], &GenerationParams::default())
            .await
            .unwrap();
        assert_eq!(response.content, "hi");
        assert_eq!(provider.calls(), 1);
        assert_eq!(provider.last_messages(), vec![Message::user("hello")]);
    }

    #[tokio::test]
    async fn test_gated_provider_waits_for_release() {
        let provider = std::sync::Arc::new(GatedProvider::new("done"));
        let p = provider.clone();
        let task = tokio::spawn(async move {
            p.complete(&[], &GenerationParams::default()).await.unwrap()
        });
        provider.wait_for_call().await;
        assert!(!task.is_finished());
        provider.release();
        assert_eq!(task.await.unwrap().content, "done");
    }
}
