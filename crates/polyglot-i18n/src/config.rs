//! Construction-time configuration for [`TranslationStore`](crate::TranslationStore)

use crate::storage::Storage;
use crate::subscription::LanguageChangeCallback;
use polyglot_config::defaults::DEFAULT_LANGUAGE;
use polyglot_config::I18nSettings;
use std::fmt;
use std::sync::Arc;

/// Store configuration. Every field is optional; unset fields take the
/// documented defaults when the store is built.
#[derive(Clone, Default)]
pub struct I18nConfig {
    /// Default language, `"en"` when unset
    pub default_language: Option<String>,
    /// Fallback language, the default language when unset
    pub fallback_language: Option<String>,
    /// Initial supported set, `{default}` when unset
    pub supported_languages: Option<Vec<String>>,
    /// RTL code set, the built-in list when unset
    pub rtl_languages: Option<Vec<String>>,
    /// Where the selected language is persisted
    pub storage: Option<Arc<dyn Storage>>,
    /// Called after subscribers on every language change
    pub on_language_change: Option<LanguageChangeCallback>,
}

impl I18nConfig {
    /// Empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Map file/env settings onto a store configuration
    pub fn from_settings(settings: &I18nSettings) -> Self {
        Self {
            default_language: Some(settings.default_language.clone()),
            fallback_language: Some(settings.effective_fallback().to_string()),
            supported_languages: Some(settings.effective_supported()),
            rtl_languages: (!settings.rtl_languages.is_empty())
                .then(|| settings.rtl_languages.clone()),
            storage: None,
            on_language_change: None,
        }
    }

    /// Set the default language
    #[must_use]
    pub fn default_language(mut self, lang: impl Into<String>) -> Self {
        self.default_language = Some(lang.into());
        self
    }

    /// Set the fallback language
    #[must_use]
    pub fn fallback_language(mut self, lang: impl Into<String>) -> Self {
        self.fallback_language = Some(lang.into());
        self
    }

    /// Set the initial supported languages
    #[must_use]
    pub fn supported_languages<I, S>(mut self, langs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_languages = Some(langs.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the RTL code set
    #[must_use]
    pub fn rtl_languages<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rtl_languages = Some(codes.into_iter().map(Into::into).collect());
        self
    }

    /// Persist the selected language through `storage`
    #[must_use]
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Callback run after subscribers on each language change
    #[must_use]
    pub fn on_language_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_language_change = Some(Arc::new(callback));
        self
    }

    pub(crate) fn resolved_default(&self) -> String {
        self.default_language
            .clone()
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    }

    pub(crate) fn resolved_fallback(&self) -> String {
        self.fallback_language
            .clone()
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| self.resolved_default())
    }
}

impl fmt::Debug for I18nConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18nConfig")
            .field("default_language", &self.default_language)
            .field("fallback_language", &self.fallback_language)
            .field("supported_languages", &self.supported_languages)
            .field("rtl_languages", &self.rtl_languages)
            .field("storage", &self.storage.is_some())
            .field("on_language_change", &self.on_language_change.is_some())
            .finish()
    }
}
