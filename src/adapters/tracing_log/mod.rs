// Tracing log adapter - Structured logging using tracing crate

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::error::PipelineError;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Pretty,
    /// JSON format for structured logging
    Json,
}

impl FromStr for LogFormat {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(PipelineError::BadArgs(format!(
                "Invalid log format: {}. Valid formats: pretty, json",
                s
            ))),
        }
    }
}

/// Validate a log level name
pub fn parse_level(level: &str) -> Result<tracing::Level, PipelineError> {
    tracing::Level::from_str(level).map_err(|_| {
        PipelineError::BadArgs(format!(
            "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
            level
        ))
    })
}

/// Build the filter: `RUST_LOG` wins, otherwise `level`
pub fn build_filter(level: &str) -> Result<EnvFilter, PipelineError> {
    let level = parse_level(level)?;
    Ok(EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase())))
}

/// Install the global subscriber; a second call is a no-op
pub fn init_logging(level: &str, format: LogFormat) -> Result<(), PipelineError> {
    let filter = build_filter(level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // try_init fails only when a subscriber is already installed
    let _ = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    Ok(())
}
