//! Provider module for Solace
//!
//! This module contains the remote completion abstraction and the
//! OpenAI-compatible implementation.

pub mod base;
pub mod openai;

pub use base::{CompletionResponse, GenerationParams, Message, Provider, Role, TokenUsage};
pub use openai::OpenAiProvider;

use crate::config::ProviderConfig;
use crate::error::{Result, SolaceError};
use std::sync::Arc;

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - Provider configuration
/// * `api_key` - Resolved credential for the remote service
///
/// # Errors
///
/// Returns error if the provider type is unknown or initialization fails
pub fn create_provider(config: &ProviderConfig, api_key: String) -> Result<Arc<dyn Provider>> {
    match config.provider_type.as_str() {
        "openai" => Ok(Arc::new(OpenAiProvider::new(config.clone(), api_key)?)),
        other => Err(SolaceError::Provider(format!("Unknown provider type: {}", other)).into()),
    }
}
