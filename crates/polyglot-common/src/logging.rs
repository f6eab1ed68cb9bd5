//! Structured logging infrastructure for Polyglot

use crate::error::{PolyglotError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human friendly output
    Pretty,
    /// Single-line condensed output
    Compact,
    /// Newline-delimited JSON
    Json,
    /// Default `tracing-subscriber` formatting
    Plain,
}

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "polyglot_i18n=trace")
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include span open/close events in the output
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn writer(&self) -> Result<(BoxMakeWriter, bool)> {
        match &self.file_path {
            Some(path) => {
                let file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)?;
                Ok((BoxMakeWriter::new(Mutex::new(file)), false))
            }
            None => Ok((BoxMakeWriter::new(std::io::stdout), true)),
        }
    }
}

/// Initialize the global tracing subscriber with the given configuration
///
/// # Errors
///
/// Fails when the log file cannot be opened or a global subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let (writer, ansi) = config.writer()?;
    let registry = tracing_subscriber::registry().with(config.env_filter());

    let installed = match config.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(ansi)
                    .with_span_events(config.span_events())
                    .with_target(config.include_targets)
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(ansi)
                    .with_span_events(config.span_events())
                    .with_target(config.include_targets)
                    .with_thread_ids(true)
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(config.span_events())
                    .with_target(config.include_targets)
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Plain => registry
            .with(
                fmt::layer()
                    .with_ansi(ansi)
                    .with_span_events(config.span_events())
                    .with_target(config.include_targets)
                    .with_writer(writer),
            )
            .try_init(),
    };

    installed.map_err(|e| PolyglotError::config("Failed to install tracing subscriber", e))
}

/// Initialize logging with default configuration
///
/// # Errors
///
/// See [`init_logging`].
pub fn init_default_logging() -> Result<()> {
    init_logging(&LoggingConfig::default())
}

/// Initialize logging for development (pretty, debug level, with spans)
///
/// # Errors
///
/// See [`init_logging`].
pub fn init_dev_logging() -> Result<()> {
    init_logging(&LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Pretty,
        include_spans: true,
        ..LoggingConfig::default()
    })
}

/// Initialize logging for production (JSON lines, info level, file output)
///
/// # Errors
///
/// See [`init_logging`].
pub fn init_prod_logging(log_file: impl Into<String>) -> Result<()> {
    init_logging(&LoggingConfig {
        level: "info".to_string(),
        format: LogFormat::Json,
        file_path: Some(log_file.into()),
        include_spans: false,
        ..LoggingConfig::default()
    })
}
