//! Error type shared by the Polyglot crates

use thiserror::Error;

/// Result type alias for Polyglot operations
pub type Result<T> = std::result::Result<T, PolyglotError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Workspace-level error. Crate errors convert into it at API boundaries.
#[derive(Error, Debug)]
pub enum PolyglotError {
    /// Settings or logging setup failed
    #[error("Configuration error: {message}")]
    Config {
        /// What was being set up
        message: String,
        /// Underlying cause
        #[source]
        source: BoxedSource,
    },

    /// I/O failure outside a more specific context
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Translation lookup, loading or persistence failed
    #[error("Localization error: {source}")]
    Localization {
        /// Language the failure relates to, when there is one
        language: Option<String>,
        /// Underlying cause
        #[source]
        source: BoxedSource,
    },
}

impl PolyglotError {
    /// Configuration error wrapping `source`
    pub fn config(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Box::new(source),
        }
    }

    /// Localization error wrapping `source`, optionally tied to a language
    pub fn localization(
        language: Option<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Localization {
            language,
            source: Box::new(source),
        }
    }

    /// Language a localization error relates to
    pub fn language(&self) -> Option<&str> {
        match self {
            Self::Localization { language, .. } => language.as_deref(),
            _ => None,
        }
    }
}
