//! Command-line interface definition for Solace
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for chat, crisis classification, and authentication.

use clap::{Parser, Subcommand};

/// Solace - supportive conversation client with a crisis safety net
#[derive(Parser, Debug, Clone)]
#[command(name = "solace")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "SOLACE_CONFIG", default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Solace
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive conversation
    Chat,

    /// Classify text with the crisis filter, without contacting any service
    Classify {
        /// Text to classify; words are joined with single spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Store an API key in the OS keyring
    Auth {
        /// Key to store; prompted for when omitted
        #[arg(long)]
        api_key: Option<String>,
    },
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            command: Commands::Chat,
        }
    }
}
