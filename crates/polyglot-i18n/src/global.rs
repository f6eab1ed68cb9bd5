//! Process-wide default store and free-function shortcuts
//!
//! Explicit [`TranslationStore`] instances are the primary API. The global
//! store is created with default configuration on first use and can be
//! replaced at any time with [`install`] or the `setup*` functions; readers
//! holding the previous `Arc` keep using it.

use crate::config::I18nConfig;
use crate::document::TranslationNode;
use crate::error::I18nResult;
use crate::loader::LazyLoader;
use crate::params::Params;
use crate::store::TranslationStore;
use crate::subscription::Subscription;
use crate::tokenizer::TranslationToken;
use crate::transport::select_transport;
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use polyglot_config::{ConfigLoader, Settings};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

static GLOBAL_STORE: Lazy<ArcSwap<TranslationStore>> =
    Lazy::new(|| ArcSwap::from_pointee(TranslationStore::default()));

/// The current global store
pub fn global() -> Arc<TranslationStore> {
    GLOBAL_STORE.load_full()
}

/// Replace the global store, returning the previous one
pub fn install(store: Arc<TranslationStore>) -> Arc<TranslationStore> {
    GLOBAL_STORE.swap(store)
}

/// Build a store from `config`, restore its persisted language and install it
pub async fn setup(config: I18nConfig) -> Arc<TranslationStore> {
    let store = Arc::new(TranslationStore::new(config));
    store.init().await;
    install(Arc::clone(&store));
    info!("Global translation store installed");
    store
}

/// [`setup`], then load only the current language through a lazy loader
/// reading `<base><lang>.<extension>`
pub async fn setup_lazy(config: I18nConfig, base: &str, extension: &str) -> I18nResult<LazyLoader> {
    let transport = select_transport(base, extension)?;
    let store = setup(config).await;
    let loader = LazyLoader::new(store, transport);

    let current = loader.store().get_language();
    loader.load(&current).await;
    Ok(loader)
}

/// [`setup_lazy`] driven by parsed settings
pub async fn setup_from_settings(settings: &Settings) -> I18nResult<LazyLoader> {
    setup_lazy(
        I18nConfig::from_settings(&settings.i18n),
        &settings.i18n.base_path,
        &settings.i18n.file_extension,
    )
    .await
}

/// Load a settings file (with environment overrides) and run [`setup_lazy`]
pub async fn setup_from_settings_file<P: AsRef<Path>>(path: P) -> polyglot_common::Result<LazyLoader> {
    let settings = ConfigLoader::load_from_file(path)?;
    Ok(setup_from_settings(&settings).await?)
}

/// Resolve settings with [`ConfigLoader::load`], install the configured
/// tracing subscriber unless one is already active, then run
/// [`setup_from_settings`]
pub async fn setup_from_env() -> polyglot_common::Result<LazyLoader> {
    let settings = ConfigLoader::load()?;
    if let Err(e) = polyglot_common::init_logging(&settings.logging) {
        debug!("Keeping existing tracing subscriber: {}", e);
    }
    Ok(setup_from_settings(&settings).await?)
}

/// A lazy loader populating the global store
pub fn create_lazy_loader(base: &str, extension: &str) -> I18nResult<LazyLoader> {
    LazyLoader::from_base(global(), base, extension)
}

/// [`TranslationStore::t`] on the global store
pub fn t(key: &str) -> String {
    global().t(key)
}

/// [`TranslationStore::t_with`] on the global store
pub fn t_with(key: &str, params: &Params) -> String {
    global().t_with(key, params)
}

/// [`TranslationStore::t_lang`] on the global store
pub fn t_lang(lang: &str, key: &str, params: Option<&Params>) -> String {
    global().t_lang(lang, key, params)
}

/// [`TranslationStore::t_parse`] on the global store
pub fn t_parse(key: &str, params: Option<&Params>) -> Vec<TranslationToken> {
    global().t_parse(key, params)
}

/// [`TranslationStore::set_language`] on the global store
pub async fn set_language(lang: &str) -> bool {
    global().set_language(lang).await
}

/// [`TranslationStore::get_language`] on the global store
pub fn get_language() -> String {
    global().get_language()
}

/// [`TranslationStore::get_supported_languages`] on the global store
pub fn get_supported_languages() -> Vec<String> {
    global().get_supported_languages()
}

/// [`TranslationStore::has_key`] on the global store
pub fn has_key(key: &str) -> bool {
    global().has_key(key)
}

/// [`TranslationStore::is_rtl`] on the global store
pub fn is_rtl() -> bool {
    global().is_rtl()
}

/// [`TranslationStore::is_rtl_language`] on the global store
pub fn is_rtl_language(lang: &str) -> bool {
    global().is_rtl_language(lang)
}

/// [`TranslationStore::on_change`] on the global store
pub fn on_change<F>(callback: F) -> Subscription
where
    F: Fn(&str) + Send + Sync + 'static,
{
    global().on_change(callback)
}

/// [`TranslationStore::load_language`] on the global store
pub fn load_language(lang: &str, document: impl Into<TranslationNode>) {
    global().load_language(lang, document);
}

/// [`TranslationStore::load_translations`] on the global store
pub fn load_translations<I, L, D>(documents: I)
where
    I: IntoIterator<Item = (L, D)>,
    L: Into<String>,
    D: Into<TranslationNode>,
{
    global().load_translations(documents);
}

/// [`TranslationStore::page_title`] on the global store
pub fn page_title(key: &str, prefix: &str) -> String {
    global().page_title(key, prefix)
}

/// [`TranslationStore::plural`] on the global store
pub fn plural(count: i64, singular_key: &str, plural_key: &str) -> String {
    global().plural(count, singular_key, plural_key)
}
