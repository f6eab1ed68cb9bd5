//! Integration tests for the translation store

use polyglot_common::test_utils::{create_temp_dir, init_test_logging, locale_fixtures, write_files};
use polyglot_i18n::{
    fetch_translations, params, I18nConfig, MemoryStorage, Storage, TranslationStore,
    TranslationToken, LANGUAGE_STORAGE_KEY,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn store(config: I18nConfig) -> TranslationStore {
    init_test_logging();
    TranslationStore::new(config)
}

#[tokio::test]
async fn test_fallback_chain_prefers_fallback_over_default() {
    let store = store(
        I18nConfig::new()
            .default_language("en")
            .fallback_language("ar")
            .supported_languages(["en", "ar", "fr"]),
    );
    store.load_language("en", json!({ "key": "X" }));
    store.load_language("ar", json!({ "key": "Y" }));

    assert!(store.set_language("fr").await);
    assert_eq!(store.t("key"), "Y");
    assert!(store.has_key("key"));
    assert!(store.get_translations().is_empty());
}

#[test]
fn test_has_key_tracks_scalar_paths_only() {
    let store = store(I18nConfig::default());
    store.load_language(
        "en",
        json!({
            "a": { "b": "deep", "empty": {} },
            "count": 3,
            "flag": false,
            "list": ["x", "y"],
            "nothing": null
        }),
    );

    for key in ["a.b", "count", "flag", "list", "nothing"] {
        assert!(store.has_key(key), "{key} should exist");
    }
    for key in ["a", "a.empty", "missing"] {
        assert!(!store.has_key(key), "{key} should not exist");
    }
    assert_eq!(store.t("count"), "3");
    assert_eq!(store.t("flag"), "false");
    assert_eq!(store.t("list"), "x,y");
}

#[test]
fn test_loading_is_idempotent() {
    let store = store(I18nConfig::default());
    let doc = json!({ "greet": "Hi {name}", "nested": { "a": "1" } });

    store.load_language("en", doc.clone());
    let first = store.get_translations();
    store.load_language("en", doc);

    assert_eq!(store.get_translations(), first);
}

#[test]
fn test_parameters() {
    let store = store(I18nConfig::default());
    store.load_language("en", json!({ "greet": "Hi {name}", "msg": "{n} items", "n": "5" }));

    assert_eq!(store.t_with("greet", &params!["name" => "Sam"]), "Hi Sam");
    assert_eq!(store.t_with("msg", &params!["n" => "n"]), "5 items");
    assert_eq!(store.t_with("greet", &params!["other" => "x"]), "Hi {name}");
}

#[test]
fn test_parse_splits_markup() {
    let store = store(I18nConfig::default());
    store.load_language("en", json!({ "msg": "Hello\\nWorld <b>x</b>", "plain": "" }));

    assert_eq!(
        store.t_parse("msg", None),
        vec![
            TranslationToken::text("Hello"),
            TranslationToken::tag("br", ""),
            TranslationToken::text("World "),
            TranslationToken::tag("b", "x"),
        ]
    );
    assert_eq!(
        store.parse("missing", None, Some("Fallback/nline")),
        vec![
            TranslationToken::text("Fallback"),
            TranslationToken::tag("br", ""),
            TranslationToken::text("line"),
        ]
    );
}

#[tokio::test]
async fn test_t_lang_never_changes_current_language() {
    let storage = Arc::new(MemoryStorage::new());
    let notified = Arc::new(AtomicUsize::new(0));
    let n = Arc::clone(&notified);

    let store = store(
        I18nConfig::new()
            .supported_languages(["en", "ar"])
            .storage(storage.clone()),
    );
    let _sub = store.on_change(move |_| {
        n.fetch_add(1, Ordering::SeqCst);
    });

    let en: serde_json::Value = serde_json::from_str(locale_fixtures::english_json()).unwrap();
    let ar: serde_json::Value = serde_json::from_str(locale_fixtures::arabic_json()).unwrap();
    store.load_translations([("en", en), ("ar", ar)]);

    assert_eq!(store.t_lang("ar", "greeting", Some(&params!["name" => "سام"])), "مرحبا سام");
    assert_eq!(store.t_lang("ar", "no.such.key", None), "no.such.key");
    assert_eq!(store.t_lang("zz", "app.name", None), "MyApp");

    assert_eq!(store.get_language(), "en");
    assert_eq!(notified.load(Ordering::SeqCst), 0);
    assert_eq!(storage.get(LANGUAGE_STORAGE_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn test_subscribers_and_unsubscribe() {
    let store = store(I18nConfig::new().supported_languages(["en", "fr", "de"]));
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));

    let seen_a = Arc::clone(&seen);
    let first = store.on_change(move |lang| seen_a.lock().push(format!("a:{lang}")));
    let _panicky = store.on_change(|_| panic!("subscriber failure"));
    let seen_b = Arc::clone(&seen);
    let _second = store.on_change(move |lang| seen_b.lock().push(format!("b:{lang}")));

    assert!(store.set_language("fr").await);
    assert!(first.unsubscribe());
    assert!(store.set_language("de").await);

    let mut seen = seen.lock().clone();
    seen.sort();
    assert_eq!(seen, vec!["a:fr", "b:de", "b:fr"]);
}

#[tokio::test]
async fn test_persisted_language_survives_restart() {
    let dir = create_temp_dir();
    let storage = Arc::new(polyglot_i18n::FileStorage::new(dir.path().join("prefs.json")));
    let config = I18nConfig::new()
        .supported_languages(["en", "ar"])
        .storage(storage);

    let first = store(config.clone());
    first.init().await;
    assert!(first.set_language("ar").await);

    let second = store(config);
    assert_eq!(second.get_language(), "en");
    second.init().await;
    assert_eq!(second.get_language(), "ar");
    assert!(second.is_rtl());
}

#[test]
fn test_rtl_classification() {
    let store = store(I18nConfig::default());
    assert!(store.is_rtl_language("AR"));
    assert!(store.is_rtl_language("ar"));
    assert!(store.is_rtl_language("he-IL"));
    assert!(!store.is_rtl_language("en"));
}

#[tokio::test]
async fn test_fetch_translations_from_files() {
    let store = store(I18nConfig::default());
    let dir = create_temp_dir();
    let paths = write_files(
        dir.path(),
        &[
            ("en.json", locale_fixtures::english_json()),
            ("AR.json", locale_fixtures::arabic_json()),
        ],
    );

    let mut sources: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    sources.push(dir.path().join("missing.json").display().to_string());

    let loaded = fetch_translations(&sources, &store).await;
    assert_eq!(loaded, 2);
    assert!(store.is_language_supported("ar"));
    assert_eq!(store.t_lang("ar", "app.name", None), "تطبيقي");
    assert_eq!(store.plural(2, "item.single", "item.plural"), "2 items");
}
