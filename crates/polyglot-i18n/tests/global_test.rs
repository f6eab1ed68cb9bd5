//! Global store setup and free-function shortcuts
//!
//! The global store is process-wide state, so everything touching it runs in
//! a single test.

use polyglot_common::test_utils::{create_temp_dir, init_test_logging, locale_fixtures, write_files};
use polyglot_i18n::global as i18n;
use polyglot_i18n::{params, I18nConfig, TranslationStore, TranslationToken};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_global_lifecycle() {
    init_test_logging();

    // Default instance on first use
    assert_eq!(i18n::get_language(), "en");
    i18n::load_language("en", json!({ "hello": "Hello {name}" }));
    assert_eq!(i18n::t_with("hello", &params!["name" => "you"]), "Hello you");
    assert!(i18n::has_key("hello"));

    // Replacing the instance
    let replacement = Arc::new(TranslationStore::new(I18nConfig::new().default_language("fr")));
    let previous = i18n::install(Arc::clone(&replacement));
    assert!(previous.has_key("hello"));
    assert!(Arc::ptr_eq(&i18n::global(), &replacement));
    assert_eq!(i18n::get_language(), "fr");
    assert!(!i18n::has_key("hello"));

    // Lazy setup from a directory
    let dir = create_temp_dir();
    write_files(
        dir.path(),
        &[
            ("en.json", locale_fixtures::english_json()),
            ("ar.json", locale_fixtures::arabic_json()),
        ],
    );
    let base = dir.path().display().to_string();
    let loader = i18n::setup_lazy(I18nConfig::new().supported_languages(["en", "ar"]), &base, "json")
        .await
        .unwrap();

    assert!(loader.is_loaded("en"));
    assert!(!loader.is_loaded("ar"));
    assert_eq!(i18n::t("app.name"), "MyApp");
    assert_eq!(i18n::page_title("profile", "page."), "Profile - MyApp");
    assert_eq!(i18n::plural(1, "item.single", "item.plural"), "1 item");

    // Load before switching
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let seen_cb = Arc::clone(&seen);
    let _sub = i18n::on_change(move |lang| seen_cb.lock().push(lang.to_string()));

    assert!(loader.load("ar").await);
    assert!(i18n::set_language("ar").await);
    assert!(!i18n::set_language("xx").await);
    assert_eq!(*seen.lock(), vec!["ar"]);

    assert!(i18n::is_rtl());
    assert!(i18n::is_rtl_language("AR"));
    assert_eq!(i18n::page_title("profile", "page."), "تطبيقي - الملف الشخصي");
    assert_eq!(i18n::t_lang("en", "app.name", None), "MyApp");
    assert_eq!(i18n::get_supported_languages(), vec!["ar", "en"]);
    assert_eq!(
        i18n::t_parse("greeting", Some(&params!["name" => "<b>سام</b>"])),
        vec![TranslationToken::text("مرحبا "), TranslationToken::tag("b", "سام")]
    );

    // A separate loader sharing the global store
    let extra = i18n::create_lazy_loader(&base, "json").unwrap();
    assert!(Arc::ptr_eq(extra.store(), &i18n::global()));

    // Settings file driven setup
    let settings_dir = create_temp_dir();
    let settings = write_files(
        settings_dir.path(),
        &[(
            "polyglot.toml",
            &format!(
                "[i18n]\ndefault_language = \"en\"\nsupported_languages = [\"en\", \"ar\"]\nbase_path = {:?}\n",
                base
            ),
        )],
    );
    let loader = i18n::setup_from_settings_file(&settings[0]).await.unwrap();
    assert!(loader.is_loaded("en"));
    assert_eq!(i18n::get_language(), "en");
    assert_eq!(i18n::t("page.profile"), "Profile");

    i18n::load_translations([("de", json!({ "app": { "name": "MeineApp" } }))]);
    assert_eq!(i18n::t_lang("de", "app.name", None), "MeineApp");

    // Settings located through the environment, with a subscriber already active
    let env_settings = write_files(
        settings_dir.path(),
        &[(
            "arabic.yaml",
            &format!(
                "i18n:\n  default_language: ar\n  supported_languages: [ar, en]\n  base_path: {:?}\nlogging:\n  level: debug\n",
                base
            ),
        )],
    );
    std::env::set_var(polyglot_config::CONFIG_PATH_ENV, &env_settings[0]);
    let loader = i18n::setup_from_env().await.unwrap();
    std::env::remove_var(polyglot_config::CONFIG_PATH_ENV);

    assert!(loader.is_loaded("ar"));
    assert_eq!(i18n::get_language(), "ar");
    assert_eq!(i18n::t("app.name"), "تطبيقي");
    assert!(i18n::is_rtl());
}
