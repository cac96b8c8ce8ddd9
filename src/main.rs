//! Solace - supportive conversation client
//!
//! Main entry point for the `solace` binary.

use anyhow::Result;

use solace::cli::{Cli, Commands};
use solace::commands;
use solace::config::Config;
use solace::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration; warnings go to a temporary stderr subscriber
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = logging::with_bootstrap_logging(|| Config::load(config_path, &cli))?;

    // Validate configuration
    config.validate()?;

    logging::init_logging(&config.logging)?;
    tracing::debug!("Loaded configuration from {}", config_path);

    match cli.command {
        Commands::Chat => {
            tracing::info!("Starting interactive chat");
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Classify { text } => {
            commands::classify::run_classify(&text)?;
            Ok(())
        }
        Commands::Auth { api_key } => {
            tracing::info!("Storing API key");
            commands::auth::authenticate(api_key).await?;
            Ok(())
        }
    }
}
