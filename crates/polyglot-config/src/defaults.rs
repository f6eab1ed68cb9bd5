//! Default values.

use crate::settings::{I18nSettings, Settings};
use polyglot_common::LoggingConfig;

/// Built-in default language
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default location of language files for the lazy loader
pub const DEFAULT_BASE_PATH: &str = "./locales/";

/// Default language file extension
pub const DEFAULT_FILE_EXTENSION: &str = "json";

/// Two-letter prefixes classified as right-to-left out of the box
pub const DEFAULT_RTL_LANGUAGES: &[&str] = &["ar", "he", "fa", "ur", "yi", "ji", "iw", "ku"];

impl Default for Settings {
    fn default() -> Self {
        Self {
            i18n: I18nSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            fallback_language: None,
            supported_languages: Vec::new(),
            rtl_languages: DEFAULT_RTL_LANGUAGES.iter().map(ToString::to_string).collect(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
        }
    }
}
