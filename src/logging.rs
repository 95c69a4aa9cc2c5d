// ABOUTME: Logging configuration and tracing subscriber setup
// ABOUTME: Env-driven level with pretty or compact console output
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use anyhow::Result;
use std::env;
use tracing_subscriber::EnvFilter;

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line format for development
    Pretty,
    /// Single-line format for space-constrained environments
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Compact,
        }
    }
}

impl LoggingConfig {
    /// Build configuration from `RUST_LOG` / `LOG_FORMAT`
    #[must_use]
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            level: env::var("RUST_LOG").unwrap_or(default.level),
            format: match env::var("LOG_FORMAT").as_deref() {
                Ok("pretty") => LogFormat::Pretty,
                _ => default.format,
            },
        }
    }
}

/// Initialize the global tracing subscriber
///
/// # Errors
///
/// Returns an error if the level string does not parse as an env filter or a
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
