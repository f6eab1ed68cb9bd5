//! On-demand language loading with in-flight deduplication

use crate::error::{I18nError, I18nResult};
use crate::store::TranslationStore;
use crate::transport::{select_transport, Transport};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use polyglot_config::I18nSettings;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

type LoadFuture = Shared<BoxFuture<'static, bool>>;

/// Per-language load records. A language is either absent (unloaded), in
/// `in_flight` (loading) or in `loaded`, never both of the last two.
#[derive(Default)]
struct LoadState {
    loaded: HashSet<String>,
    in_flight: HashMap<String, LoadFuture>,
}

struct LoaderInner {
    store: Arc<TranslationStore>,
    transport: Arc<dyn Transport>,
    state: Mutex<LoadState>,
}

/// Loads language documents into a store the first time they are needed.
///
/// Concurrent [`load`](Self::load) calls for one language share a single
/// transport call. The call runs as its own tokio task, so it settles even
/// if every caller stops waiting. Cloning is cheap and clones share their
/// records.
#[derive(Clone)]
pub struct LazyLoader {
    inner: Arc<LoaderInner>,
}

impl LazyLoader {
    /// Populate `store` through `transport`
    pub fn new(store: Arc<TranslationStore>, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                store,
                transport,
                state: Mutex::new(LoadState::default()),
            }),
        }
    }

    /// Populate `store` from `<base><lang>.<extension>`, over HTTP for URLs
    /// and from disk otherwise
    pub fn from_base(store: Arc<TranslationStore>, base: &str, extension: &str) -> I18nResult<Self> {
        let transport = select_transport(base, extension)?;
        debug!("Lazy loader using base: {} (.{})", base, extension);
        Ok(Self::new(store, transport))
    }

    /// Populate `store` from the base path and extension in `settings`
    pub fn from_settings(store: Arc<TranslationStore>, settings: &I18nSettings) -> I18nResult<Self> {
        Self::from_base(store, &settings.base_path, &settings.file_extension)
    }

    /// Ensure `lang` is loaded. Returns `true` once its document is merged
    /// into the store; `false` if the transport failed, in which case a
    /// later call tries again.
    pub async fn load(&self, lang: &str) -> bool {
        let pending = {
            let mut state = self.inner.state.lock();
            if state.loaded.contains(lang) {
                return true;
            }

            if let Some(pending) = state.in_flight.get(lang) {
                debug!("Joining in-flight load for language: {}", lang);
                pending.clone()
            } else {
                let task = tokio::spawn(run_load(Arc::clone(&self.inner), lang.to_string()));
                let pending = async move {
                    match task.await {
                        Ok(loaded) => loaded,
                        Err(e) => {
                            warn!("Load task ended abnormally: {}", e);
                            false
                        }
                    }
                }
                .boxed()
                .shared();
                state.in_flight.insert(lang.to_string(), pending.clone());
                pending
            }
        };

        pending.await
    }

    /// Whether `lang` finished loading successfully
    pub fn is_loaded(&self, lang: &str) -> bool {
        self.inner.state.lock().loaded.contains(lang)
    }

    /// Whether a load for `lang` is in flight
    pub fn is_loading(&self, lang: &str) -> bool {
        self.inner.state.lock().in_flight.contains_key(lang)
    }

    /// Languages loaded so far, sorted
    pub fn loaded_languages(&self) -> Vec<String> {
        let mut langs: Vec<String> = self.inner.state.lock().loaded.iter().cloned().collect();
        langs.sort();
        langs
    }

    /// The store being populated
    pub fn store(&self) -> &Arc<TranslationStore> {
        &self.inner.store
    }
}

/// Drops the in-flight record for a language if its task ends early
struct InFlightGuard {
    inner: Arc<LoaderInner>,
    lang: String,
    settled: bool,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if !self.settled {
            self.inner.state.lock().in_flight.remove(&self.lang);
        }
    }
}

/// One transport call. Settles the record for `lang` before completing.
async fn run_load(inner: Arc<LoaderInner>, lang: String) -> bool {
    debug!("Loading language: {}", lang);
    let mut guard = InFlightGuard {
        inner: Arc::clone(&inner),
        lang: lang.clone(),
        settled: false,
    };

    let loaded = match inner.transport.fetch(&lang).await {
        Ok(document) => {
            inner.store.load_language(&lang, document);
            info!("Language loaded: {}", lang);
            true
        }
        Err(e) => {
            warn!("{}", I18nError::load_failure(lang.as_str(), e));
            false
        }
    };

    let mut state = inner.state.lock();
    if loaded {
        state.loaded.insert(lang.clone());
    }
    state.in_flight.remove(&lang);
    guard.settled = true;
    drop(state);

    loaded
}

impl fmt::Debug for LazyLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("LazyLoader")
            .field("loaded", &state.loaded)
            .field("in_flight", &state.in_flight.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TranslationNode;
    use async_trait::async_trait;
    use serde_json::json;

    struct StaticTransport;

    #[async_trait]
    impl Transport for StaticTransport {
        async fn fetch(&self, lang: &str) -> I18nResult<TranslationNode> {
            match lang {
                "fr" => Ok(json!({ "hello": "Bonjour" }).into()),
                other => Err(I18nError::ParseError {
                    location: format!("{other}.json"),
                    message: "no such language".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_load_success_and_failure() {
        let store = Arc::new(TranslationStore::default());
        let loader = LazyLoader::new(Arc::clone(&store), Arc::new(StaticTransport));

        assert!(loader.load("fr").await);
        assert!(loader.is_loaded("fr"));
        assert!(!loader.is_loading("fr"));
        assert!(store.is_language_supported("fr"));
        assert_eq!(store.t_lang("fr", "hello", None), "Bonjour");

        assert!(!loader.load("de").await);
        assert!(!loader.is_loaded("de"));
        assert!(!loader.is_loading("de"));
        assert_eq!(loader.loaded_languages(), vec!["fr"]);
    }

    #[tokio::test]
    async fn test_from_base_reads_local_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.json"), r#"{"app":{"name":"Demo"}}"#).unwrap();

        let store = Arc::new(TranslationStore::default());
        let base = dir.path().to_str().unwrap();
        let loader = LazyLoader::from_base(Arc::clone(&store), base, "json").unwrap();

        assert!(loader.load("en").await);
        assert_eq!(store.t("app.name"), "Demo");
    }
}
