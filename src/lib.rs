//! Solace - supportive conversation client library
//!
//! A conversational client for an OpenAI-compatible completion service
//! with a local crisis safety net: utterances that look like crisis
//! language never leave the machine and are answered with a fixed
//! referral instead.
//!
//! # Architecture
//!
//! - `safety`: crisis phrase classifier
//! - `context`: bounded context window builder
//! - `providers`: provider abstraction and the OpenAI-compatible client
//! - `gateway`: completion gateway with error classification
//! - `session`: conversation state machine and its async driver
//! - `prompts`: fixed texts (system prompt, disclaimer, referral, guidance)
//! - `config`, `credentials`, `logging`, `error`: ambient plumbing
//! - `cli`, `commands`: command-line front end
//!
//! # Example
//!
//! ```no_run
//! use solace::{ChatSession, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let session = ChatSession::from_config(&config);
//!     let outcome = session.submit("I had a rough day at work").await;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod prompts;
pub mod providers;
pub mod safety;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SolaceError};
pub use gateway::{CompletionGateway, CompletionResult, ErrorKind};
pub use safety::{classify, CrisisVerdict};
pub use session::{ChatSession, SessionSnapshot, SubmitOutcome};

#[cfg(test)]
pub mod test_utils;
