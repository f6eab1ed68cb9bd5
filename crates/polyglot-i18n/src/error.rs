//! Error types for internationalization operations
//!
//! None of these are fatal. Store operations report them through `tracing`
//! and return a safe value; only transports and storage adapters hand them
//! back as `Err`.

use polyglot_common::PolyglotError;
use thiserror::Error;

/// Errors that can occur during internationalization operations
#[derive(Error, Debug)]
pub enum I18nError {
    /// Key absent from every table in the fallback chain
    #[error("Translation key not found: \"{key}\" (lang: {language})")]
    MissingKey {
        /// Requested key
        key: String,
        /// Language that was current for the lookup
        language: String,
    },

    /// Language outside the supported set
    #[error("Language \"{0}\" not supported")]
    UnsupportedLanguage(String),

    /// A transport call for a language failed
    #[error("Failed to load language \"{language}\": {source}")]
    LoadFailure {
        /// Language being loaded
        language: String,
        /// Transport error
        #[source]
        source: Box<I18nError>,
    },

    /// Failed to read a resource file
    #[error("Failed to read resource file: {path}")]
    ResourceLoadError {
        /// File path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Resource contents could not be parsed
    #[error("Failed to parse resource {location}: {message}")]
    ParseError {
        /// File path or URL
        location: String,
        /// Parser message
        message: String,
    },

    /// HTTP request returned a non-success status
    #[error("Failed to load language from URL: {url} ({status})")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// Status code
        status: u16,
    },

    /// HTTP request failed before a response arrived
    #[cfg(feature = "http")]
    #[error("Error fetching from URL: {url}")]
    Network {
        /// Requested URL
        url: String,
        /// Client error
        #[source]
        source: reqwest::Error,
    },

    /// Base location is not a usable URL
    #[error("Invalid base URL \"{url}\": {message}")]
    InvalidUrl {
        /// Offending base location
        url: String,
        /// Why it was rejected
        message: String,
    },

    /// Storage adapter failure
    #[error("Storage error: {message}")]
    Storage {
        /// What went wrong
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl I18nError {
    /// Wrap a transport error as a load failure for `language`
    pub fn load_failure(language: impl Into<String>, source: Self) -> Self {
        Self::LoadFailure {
            language: language.into(),
            source: Box::new(source),
        }
    }

    /// Create a storage error with a source
    pub fn storage(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Storage {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<I18nError> for PolyglotError {
    fn from(err: I18nError) -> Self {
        let language = match &err {
            I18nError::MissingKey { language, .. } | I18nError::LoadFailure { language, .. } => {
                Some(language.clone())
            }
            I18nError::UnsupportedLanguage(language) => Some(language.clone()),
            _ => None,
        };
        PolyglotError::localization(language, err)
    }
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
