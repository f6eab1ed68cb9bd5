//! Translation store: per-language tables, fallback-chain resolution and
//! language switching

use crate::config::I18nConfig;
use crate::direction::RtlLanguages;
use crate::document::{FlatTable, TranslationNode};
use crate::error::I18nError;
use crate::params::{substitute, Params};
use crate::storage::{Storage, LANGUAGE_STORAGE_KEY};
use crate::subscription::{invoke_isolated, LanguageChangeCallback, Subscribers, Subscription};
use crate::tokenizer::{self, TranslationToken};
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Mutable store state, always accessed under one lock
#[derive(Debug)]
struct StoreState {
    translations: HashMap<String, FlatTable>,
    current: String,
    default: String,
    fallback: String,
    supported: BTreeSet<String>,
    rtl: RtlLanguages,
}

impl StoreState {
    /// Languages consulted when `current` is the active language, in order
    fn chain<'a>(&'a self, current: &'a str) -> impl Iterator<Item = &'a str> {
        let fallback = (self.fallback != current).then_some(self.fallback.as_str());
        let default = (self.default != current && self.default != self.fallback)
            .then_some(self.default.as_str());
        std::iter::once(current).chain(fallback).chain(default)
    }

    /// First non-empty value for `key` along the chain
    fn lookup(&self, current: &str, key: &str) -> Option<&str> {
        self.chain(current).find_map(|lang| {
            self.translations
                .get(lang)
                .and_then(|table| table.get(key))
                .map(String::as_str)
                .filter(|text| !text.is_empty())
        })
    }

    /// Resolve `key`, reporting a miss and falling back to `fallback` or the key
    fn resolve(&self, current: &str, key: &str, fallback: Option<&str>) -> String {
        if let Some(text) = self.lookup(current, key) {
            return text.to_string();
        }

        warn!(
            "{}",
            I18nError::MissingKey {
                key: key.to_string(),
                language: current.to_string(),
            }
        );
        fallback
            .filter(|text| !text.is_empty())
            .unwrap_or(key)
            .to_string()
    }

    /// Resolve, then substitute parameters. Each parameter value is first
    /// tried as a key; a miss there is silent and keeps the literal value.
    fn render(&self, current: &str, key: &str, params: Option<&Params>, fallback: Option<&str>) -> String {
        let text = self.resolve(current, key, fallback);
        match params {
            Some(params) if !params.is_empty() => {
                let values = params.map_values(|value| {
                    self.lookup(current, value).unwrap_or(value).to_string()
                });
                substitute(&text, &values)
            }
            _ => text,
        }
    }
}

/// Holds every loaded language and the current language selection.
///
/// Shared between tasks behind an `Arc`. Locks are never held across an
/// `.await`, and none of the lookups mutate state.
pub struct TranslationStore {
    state: RwLock<StoreState>,
    storage: Option<Arc<dyn Storage>>,
    on_language_change: Option<LanguageChangeCallback>,
    subscribers: Subscribers,
}

impl TranslationStore {
    /// Create a store from configuration. Call [`init`](Self::init) to adopt
    /// a persisted language.
    pub fn new(config: I18nConfig) -> Self {
        let default = config.resolved_default();
        let fallback = config.resolved_fallback();

        let supported: BTreeSet<String> = config
            .supported_languages
            .clone()
            .filter(|langs| !langs.is_empty())
            .map_or_else(|| BTreeSet::from([default.clone()]), |langs| langs.into_iter().collect());

        let rtl = config
            .rtl_languages
            .as_ref()
            .map_or_else(RtlLanguages::default, RtlLanguages::new);

        debug!(
            default = %default,
            fallback = %fallback,
            supported = ?supported,
            "Translation store created"
        );

        Self {
            state: RwLock::new(StoreState {
                translations: HashMap::new(),
                current: default.clone(),
                default,
                fallback,
                supported,
                rtl,
            }),
            storage: config.storage,
            on_language_change: config.on_language_change,
            subscribers: Subscribers::default(),
        }
    }

    /// Adopt the persisted language if storage holds a supported one
    pub async fn init(&self) {
        let Some(storage) = &self.storage else {
            return;
        };

        match storage.get(LANGUAGE_STORAGE_KEY).await {
            Ok(Some(stored)) => {
                let mut state = self.state.write();
                if state.supported.contains(&stored) {
                    info!("Restored persisted language: {}", stored);
                    state.current = stored;
                } else {
                    debug!("Ignoring unsupported persisted language: {}", stored);
                }
            }
            Ok(None) => debug!("No persisted language"),
            Err(e) => warn!("Failed to read persisted language: {}", e),
        }
    }

    /// Flatten `document` and merge it into `lang`'s table. Existing keys are
    /// overwritten, others kept. `lang` becomes supported.
    pub fn load_language(&self, lang: &str, document: impl Into<TranslationNode>) {
        let flat = document.into().flatten();
        let added = flat.len();

        let mut state = self.state.write();
        state.translations.entry(lang.to_string()).or_default().extend(flat);
        state.supported.insert(lang.to_string());
        drop(state);

        debug!("Loaded {} keys for language: {}", added, lang);
    }

    /// [`load_language`](Self::load_language) for each entry, in sorted
    /// language order. Repeated languages merge in input order.
    pub fn load_translations<I, L, D>(&self, documents: I)
    where
        I: IntoIterator<Item = (L, D)>,
        L: Into<String>,
        D: Into<TranslationNode>,
    {
        let mut ordered: Vec<(String, TranslationNode)> = documents
            .into_iter()
            .map(|(lang, doc)| (lang.into(), doc.into()))
            .collect();
        ordered.sort_by(|a, b| a.0.cmp(&b.0));

        for (lang, document) in ordered {
            self.load_language(&lang, document);
        }
    }

    /// Raw lookup along the fallback chain, without parameters
    pub fn resolve(&self, key: &str, fallback: Option<&str>) -> String {
        let state = self.state.read();
        state.resolve(&state.current, key, fallback)
    }

    /// Resolve `key` and substitute `params`
    pub fn translate(&self, key: &str, params: Option<&Params>, fallback: Option<&str>) -> String {
        let state = self.state.read();
        state.render(&state.current, key, params, fallback)
    }

    /// Translate `key` without parameters
    pub fn t(&self, key: &str) -> String {
        self.translate(key, None, None)
    }

    /// Translate `key` with parameters
    pub fn t_with(&self, key: &str, params: &Params) -> String {
        self.translate(key, Some(params), None)
    }

    /// Translate as if `lang` were current. Nothing observable changes: no
    /// switch, persistence or notification.
    pub fn translate_in(
        &self,
        lang: &str,
        key: &str,
        params: Option<&Params>,
        fallback: Option<&str>,
    ) -> String {
        let state = self.state.read();
        if !state.supported.contains(lang) {
            warn!("{}", I18nError::UnsupportedLanguage(lang.to_string()));
        }
        state.render(lang, key, params, fallback)
    }

    /// Translate `key` in `lang`
    pub fn t_lang(&self, lang: &str, key: &str, params: Option<&Params>) -> String {
        self.translate_in(lang, key, params, None)
    }

    /// Translate, then split the result into text and tag tokens
    pub fn parse(&self, key: &str, params: Option<&Params>, fallback: Option<&str>) -> Vec<TranslationToken> {
        tokenizer::parse(&self.translate(key, params, fallback))
    }

    /// Tokenized translation of `key`
    pub fn t_parse(&self, key: &str, params: Option<&Params>) -> Vec<TranslationToken> {
        self.parse(key, params, None)
    }

    /// Switch the current language.
    ///
    /// Unsupported languages are reported and ignored (`false`). Otherwise
    /// the choice is persisted, subscribers are notified and then the
    /// construction-time callback runs.
    pub async fn set_language(&self, lang: &str) -> bool {
        {
            let mut state = self.state.write();
            if !state.supported.contains(lang) {
                drop(state);
                warn!("{}", I18nError::UnsupportedLanguage(lang.to_string()));
                return false;
            }
            state.current = lang.to_string();
        }
        info!("Language changed to: {}", lang);

        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set(LANGUAGE_STORAGE_KEY, lang).await {
                warn!("Failed to persist language {}: {}", lang, e);
            }
        }

        self.subscribers.notify(lang);
        if let Some(callback) = &self.on_language_change {
            invoke_isolated(callback, lang, None);
        }

        true
    }

    /// Current language
    pub fn get_language(&self) -> String {
        self.state.read().current.clone()
    }

    /// Default language
    pub fn default_language(&self) -> String {
        self.state.read().default.clone()
    }

    /// Fallback language
    pub fn fallback_language(&self) -> String {
        self.state.read().fallback.clone()
    }

    /// Supported languages in sorted order
    pub fn get_supported_languages(&self) -> Vec<String> {
        self.state.read().supported.iter().cloned().collect()
    }

    /// Whether `lang` is in the supported set
    pub fn is_language_supported(&self, lang: &str) -> bool {
        self.state.read().supported.contains(lang)
    }

    /// Whether `key` has a non-empty value anywhere in the current chain
    pub fn has_key(&self, key: &str) -> bool {
        let state = self.state.read();
        state.lookup(&state.current, key).is_some()
    }

    /// Copy of the current language's table
    pub fn get_translations(&self) -> FlatTable {
        let state = self.state.read();
        state
            .translations
            .get(&state.current)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether the current language is right-to-left
    pub fn is_rtl(&self) -> bool {
        let state = self.state.read();
        state.rtl.is_rtl(&state.current)
    }

    /// Whether `lang` is right-to-left
    pub fn is_rtl_language(&self, lang: &str) -> bool {
        self.state.read().rtl.is_rtl(lang)
    }

    /// Classify another code as right-to-left
    pub fn add_rtl_language(&self, code: &str) -> bool {
        self.state.write().rtl.insert(code)
    }

    /// Register a language-change callback
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(Arc::new(callback))
    }
}

impl Default for TranslationStore {
    fn default() -> Self {
        Self::new(I18nConfig::default())
    }
}

impl fmt::Debug for TranslationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("TranslationStore")
            .field("current", &state.current)
            .field("default", &state.default)
            .field("fallback", &state.fallback)
            .field("supported", &state.supported)
            .field("languages_loaded", &state.translations.len())
            .field("storage", &self.storage.is_some())
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use crate::storage::MemoryStorage;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn store_with(config: I18nConfig) -> TranslationStore {
        polyglot_common::test_utils::init_test_logging();
        TranslationStore::new(config)
    }

    #[test]
    fn test_defaults() {
        let store = store_with(I18nConfig::default());
        assert_eq!(store.get_language(), "en");
        assert_eq!(store.default_language(), "en");
        assert_eq!(store.fallback_language(), "en");
        assert_eq!(store.get_supported_languages(), vec!["en"]);
        assert!(!store.is_rtl());
    }

    #[test]
    fn test_fallback_chain_order() {
        let store = store_with(
            I18nConfig::new()
                .default_language("en")
                .fallback_language("ar")
                .supported_languages(["en", "ar", "fr"]),
        );
        store.load_language("en", json!({ "key": "X", "only_en": "E" }));
        store.load_language("ar", json!({ "key": "Y" }));

        let state = store.state.read();
        assert_eq!(state.chain("fr").collect::<Vec<_>>(), vec!["fr", "ar", "en"]);
        assert_eq!(state.chain("ar").collect::<Vec<_>>(), vec!["ar", "en"]);
        assert_eq!(state.chain("en").collect::<Vec<_>>(), vec!["en", "ar"]);
        drop(state);

        assert_eq!(store.t_lang("fr", "key", None), "Y");
        assert_eq!(store.t_lang("fr", "only_en", None), "E");
    }

    #[test]
    fn test_empty_values_fall_through() {
        let store = store_with(I18nConfig::new().fallback_language("de"));
        store.load_language("en", json!({ "title": "" }));
        store.load_language("de", json!({ "title": "Titel" }));

        assert_eq!(store.t("title"), "Titel");
    }

    #[test]
    fn test_missing_key_returns_fallback_or_key() {
        let store = store_with(I18nConfig::default());
        assert_eq!(store.resolve("nope", None), "nope");
        assert_eq!(store.resolve("nope", Some("Default text")), "Default text");
        assert_eq!(store.resolve("nope", Some("")), "nope");
        assert_eq!(store.translate("nope", None, Some("Hi {x}")), "Hi {x}");
    }

    #[test]
    fn test_merge_not_replace() {
        let store = store_with(I18nConfig::default());
        store.load_language("en", json!({ "a": "1", "b": "2" }));
        store.load_language("en", json!({ "b": "3", "c": "4" }));

        let table = store.get_translations();
        assert_eq!(table.len(), 3);
        assert_eq!(table["a"], "1");
        assert_eq!(table["b"], "3");
    }

    #[test]
    fn test_load_translations_merges_repeated_language() {
        let store = store_with(I18nConfig::default());
        store.load_translations([
            ("en", json!({ "a": "1", "b": "2" })),
            ("fr", json!({ "a": "un" })),
            ("en", json!({ "b": "3", "c": "4" })),
        ]);

        let table = store.get_translations();
        assert_eq!(table.len(), 3);
        assert_eq!(table["a"], "1");
        assert_eq!(table["b"], "3");
        assert_eq!(table["c"], "4");
        assert_eq!(store.t_lang("fr", "a", None), "un");
    }

    #[test]
    fn test_load_adds_supported_language() {
        let store = store_with(I18nConfig::default());
        assert!(!store.is_language_supported("de"));
        store.load_language("de", TranslationNode::empty());
        assert!(store.is_language_supported("de"));
        assert!(!store.has_key("anything"));
    }

    #[test]
    fn test_params_resolve_as_keys() {
        let store = store_with(I18nConfig::default());
        store.load_language("en", json!({ "msg": "{n} items", "n": "5", "greet": "Hi {name}" }));

        assert_eq!(store.t_with("msg", &params!["n" => "n"]), "5 items");
        assert_eq!(store.t_with("greet", &params!["name" => "Sam"]), "Hi Sam");
    }

    #[test]
    fn test_t_lang_resolves_in_other_language() {
        let store = store_with(I18nConfig::new().supported_languages(["en", "ar"]));
        store.load_language("en", json!({ "hello": "Hello {who}", "world": "World" }));
        store.load_language("ar", json!({ "hello": "مرحبا {who}", "world": "عالم" }));

        assert_eq!(store.t_lang("ar", "hello", Some(&params!["who" => "world"])), "مرحبا عالم");
        assert_eq!(store.get_language(), "en");

        assert_eq!(store.t_lang("xx", "hello", None), "Hello {who}");
        assert_eq!(store.get_language(), "en");
    }

    #[test]
    fn test_parse_tokens() {
        let store = store_with(I18nConfig::default());
        store.load_language("en", json!({ "msg": "Hello\\nWorld <b>{name}</b>" }));

        let tokens = store.t_parse("msg", Some(&params!["name" => "x"]));
        assert_eq!(
            tokens,
            vec![
                TranslationToken::text("Hello"),
                TranslationToken::tag("br", ""),
                TranslationToken::text("World "),
                TranslationToken::tag("b", "x"),
            ]
        );
    }

    #[tokio::test]
    async fn test_set_language_rejects_unsupported() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let store = store_with(I18nConfig::default().on_language_change(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        }));

        assert!(!store.set_language("fr").await);
        assert_eq!(store.get_language(), "en");
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_set_language_persists_and_notifies() {
        let storage = Arc::new(MemoryStorage::new());
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let seen_cb = Arc::clone(&seen);

        let store = store_with(
            I18nConfig::new()
                .supported_languages(["en", "ar"])
                .storage(storage.clone())
                .on_language_change(move |lang| seen_cb.lock().push(format!("callback:{lang}"))),
        );
        let seen_sub = Arc::clone(&seen);
        let _sub = store.on_change(move |lang| seen_sub.lock().push(format!("subscriber:{lang}")));

        assert!(store.set_language("ar").await);
        assert_eq!(store.get_language(), "ar");
        assert!(store.is_rtl());
        assert_eq!(
            storage.get(LANGUAGE_STORAGE_KEY).await.unwrap().as_deref(),
            Some("ar")
        );
        assert_eq!(*seen.lock(), vec!["subscriber:ar", "callback:ar"]);
    }

    #[tokio::test]
    async fn test_init_adopts_only_supported_language() {
        let storage = Arc::new(MemoryStorage::with_values([(LANGUAGE_STORAGE_KEY, "ar")]));
        let store = store_with(
            I18nConfig::new()
                .supported_languages(["en", "ar"])
                .storage(storage.clone()),
        );
        store.init().await;
        assert_eq!(store.get_language(), "ar");

        let other = store_with(I18nConfig::new().storage(storage));
        other.init().await;
        assert_eq!(other.get_language(), "en");
    }

    #[test]
    fn test_rtl_is_extensible() {
        let store = store_with(I18nConfig::default());
        assert!(store.is_rtl_language("AR"));
        assert!(!store.is_rtl_language("dv"));
        assert!(store.add_rtl_language("dv"));
        assert!(store.is_rtl_language("dv"));

        let custom = store_with(I18nConfig::new().rtl_languages(["he"]));
        assert!(!custom.is_rtl_language("ar"));
    }
}
