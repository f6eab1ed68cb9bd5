//! Settings structures

use polyglot_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Top-level settings file layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    /// Translation store and loader settings
    #[validate]
    pub i18n: I18nSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Translation store and lazy loader settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct I18nSettings {
    /// Language used when nothing else is selected
    #[validate(custom(function = "crate::validation::validate_language_code", message = "Default language must be a non-empty code without whitespace"))]
    pub default_language: String,

    /// Language consulted after the current one; defaults to `default_language`
    #[validate(custom(function = "crate::validation::validate_language_code", message = "Fallback language must be a non-empty code without whitespace"))]
    pub fallback_language: Option<String>,

    /// Initially supported languages; empty means just `default_language`
    #[validate(custom(function = "crate::validation::validate_language_list", message = "Supported languages must be non-empty codes without whitespace"))]
    pub supported_languages: Vec<String>,

    /// Two-letter prefixes of right-to-left languages
    #[validate(custom(function = "crate::validation::validate_language_list", message = "RTL codes must be non-empty codes without whitespace"))]
    pub rtl_languages: Vec<String>,

    /// Directory or URL prefix the lazy loader fetches `<lang>.<ext>` from
    #[validate(length(min = 1, message = "Base path cannot be empty"))]
    pub base_path: String,

    /// File extension of language files, without the dot
    #[validate(custom(function = "crate::validation::validate_file_extension", message = "File extension must be alphanumeric without a leading dot"))]
    pub file_extension: String,
}

impl I18nSettings {
    /// The fallback language, resolved against the default
    pub fn effective_fallback(&self) -> &str {
        self.fallback_language
            .as_deref()
            .unwrap_or(&self.default_language)
    }

    /// The supported language list, resolved against the default
    pub fn effective_supported(&self) -> Vec<String> {
        if self.supported_languages.is_empty() {
            vec![self.default_language.clone()]
        } else {
            self.supported_languages.clone()
        }
    }
}
