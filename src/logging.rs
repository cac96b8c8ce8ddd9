//! Structured logging setup
//!
//! Logs go to stderr so they never interleave with the conversation on
//! stdout. `RUST_LOG` takes precedence over the configured level.
//! Utterance and completion text is never logged; events carry session
//! ids, error kinds and sizes only.

use crate::config::LoggingConfig;
use crate::error::{Result, SolaceError};
use std::fs::{File, OpenOptions};
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const BOOTSTRAP_LEVEL: &str = "warn";

/// Initialize the global subscriber
///
/// Supports JSON or human-readable output with an optional file copy.
/// Fails if the filter directive is invalid, the log file cannot be
/// opened, or a subscriber is already installed.
///
/// # Examples
///
/// ```no_run
/// use solace::config::LoggingConfig;
/// use solace::logging::init_logging;
///
/// let config = LoggingConfig {
///     level: "solace=info".to_string(),
///     json_format: true,
///     file_path: None,
/// };
///
/// init_logging(&config).unwrap();
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_filter(config)?;
    let file = open_log_file(config)?;
    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json_format {
        let stderr_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr);
        let file_layer = file.map(|file| {
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(file)
        });

        registry.with(stderr_layer).with(file_layer).try_init()?;
    } else {
        let stderr_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr);
        let file_layer = file.map(|file| {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_writer(file)
        });

        registry.with(stderr_layer).with(file_layer).try_init()?;
    }

    Ok(())
}

/// Run `f` with a temporary stderr subscriber on the current thread
///
/// Configuration loading logs before the configured subscriber can be
/// built. `RUST_LOG` applies here too; otherwise the default level does.
///
/// # Examples
///
/// ```
/// use solace::logging::with_bootstrap_logging;
///
/// let answer = with_bootstrap_logging(|| {
///     tracing::warn!("visible before init_logging");
///     42
/// });
/// assert_eq!(answer, 42);
/// ```
pub fn with_bootstrap_logging<T>(f: impl FnOnce() -> T) -> T {
    let filter = build_filter(&LoggingConfig::default())
        .unwrap_or_else(|_| EnvFilter::new(BOOTSTRAP_LEVEL));
    let subscriber = fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}

/// Filter from `RUST_LOG`, falling back to the configured level
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?)
}

fn open_log_file(config: &LoggingConfig) -> Result<Option<Arc<File>>> {
    let Some(path) = &config.file_path else {
        return Ok(None);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(SolaceError::from)?;
    Ok(Some(Arc::new(file)))
}
