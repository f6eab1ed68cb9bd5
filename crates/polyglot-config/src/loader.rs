//! Settings loading utilities

use crate::settings::Settings;
use polyglot_common::logging::LogFormat;
use polyglot_common::{PolyglotError, Result as PolyglotResult};
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

/// Environment variable naming an explicit settings file
pub const CONFIG_PATH_ENV: &str = "POLYGLOT_CONFIG_PATH";

/// Files probed in the working directory when no path is given
const DEFAULT_CONFIG_FILES: &[&str] = &["polyglot.yaml", "polyglot.yml", "polyglot.toml"];

/// Settings loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading the settings file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Settings validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParseError {
        /// Variable name
        var: String,
        /// What went wrong
        message: String,
    },

    /// File extension is neither YAML nor TOML
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),
}

impl From<ConfigError> for PolyglotError {
    fn from(err: ConfigError) -> Self {
        PolyglotError::config("Failed to load settings", err)
    }
}

/// Settings file syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Guess the format from a file path's extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => Ok(Self::Yaml),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string())),
        }
    }
}

/// Settings loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
        Self::load_config_with(path, |var| env::var(var).ok())
    }

    /// Like [`ConfigLoader::load_config`], reading overrides through `lookup`
    pub fn load_config_with<P, F>(path: P, lookup: F) -> Result<Settings, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        debug!(path = %path.display(), ?format, "Loading settings file");

        let content = std::fs::read_to_string(path)?;
        let mut settings = Self::parse(&content, format)?;

        Self::apply_overrides(&mut settings, lookup)?;
        settings.validate()?;

        info!(path = %path.display(), "Settings loaded");
        Ok(settings)
    }

    /// Parse settings text without touching the environment or validating
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Settings, ConfigError> {
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        })
    }

    /// Load settings from `POLYGLOT_CONFIG_PATH`, a default file in the
    /// working directory, or built-in defaults, in that order
    pub fn load() -> PolyglotResult<Settings> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(config_path)?);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES.iter().find(|p| Path::new(p).exists()) {
            return Ok(Self::load_config(path)?);
        }

        debug!("No settings file found, using defaults");
        let mut settings = Settings::default();
        Self::apply_overrides(&mut settings, |var| env::var(var).ok())?;
        settings.validate().map_err(ConfigError::from)?;
        Ok(settings)
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PolyglotResult<Settings> {
        Ok(Self::load_config(path)?)
    }

    /// Apply `POLYGLOT_*` overrides read through `lookup`
    pub fn apply_overrides<F>(settings: &mut Settings, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(lang) = lookup("POLYGLOT_DEFAULT_LANGUAGE") {
            settings.i18n.default_language = lang;
        }

        if let Some(lang) = lookup("POLYGLOT_FALLBACK_LANGUAGE") {
            settings.i18n.fallback_language = Some(lang);
        }

        if let Some(langs) = lookup("POLYGLOT_SUPPORTED_LANGUAGES") {
            settings.i18n.supported_languages = split_list(&langs);
        }

        if let Some(langs) = lookup("POLYGLOT_RTL_LANGUAGES") {
            settings.i18n.rtl_languages = split_list(&langs);
        }

        if let Some(base_path) = lookup("POLYGLOT_BASE_PATH") {
            settings.i18n.base_path = base_path;
        }

        if let Some(extension) = lookup("POLYGLOT_FILE_EXTENSION") {
            settings.i18n.file_extension = extension;
        }

        if let Some(level) = lookup("POLYGLOT_LOG_LEVEL") {
            settings.logging.level = level;
        }

        if let Some(format) = lookup("POLYGLOT_LOG_FORMAT") {
            settings.logging.format = parse_log_format(&format).ok_or_else(|| ConfigError::EnvParseError {
                var: "POLYGLOT_LOG_FORMAT".to_string(),
                message: format!("unknown log format '{format}'"),
            })?;
        }

        Ok(())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_log_format(value: &str) -> Option<LogFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "pretty" => Some(LogFormat::Pretty),
        "compact" => Some(LogFormat::Compact),
        "json" => Some(LogFormat::Json),
        "plain" => Some(LogFormat::Plain),
        _ => None,
    }
}
