//! Convenience formatting on top of the store

use crate::params::Params;
use crate::store::TranslationStore;

/// Key of the application name used by [`TranslationStore::page_title`]
pub const APP_NAME_KEY: &str = "app.name";

/// Default key prefix for page names
pub const DEFAULT_PAGE_PREFIX: &str = "page.";

impl TranslationStore {
    /// `"<page> - <app>"`, or `"<app> - <page>"` when the current language is
    /// right-to-left. The page name is looked up under `prefix + key`.
    pub fn page_title(&self, key: &str, prefix: &str) -> String {
        let app_name = self.t(APP_NAME_KEY);
        let page_name = self.t(&format!("{prefix}{key}"));

        if self.is_rtl() {
            format!("{app_name} - {page_name}")
        } else {
            format!("{page_name} - {app_name}")
        }
    }

    /// Translate `singular_key` when `count` is exactly one and `plural_key`
    /// otherwise, with `{count}` substituted
    pub fn plural(&self, count: i64, singular_key: &str, plural_key: &str) -> String {
        let key = if count == 1 { singular_key } else { plural_key };
        self.t_with(key, &Params::new().with("count", count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::I18nConfig;
    use polyglot_common::test_utils::locale_fixtures;

    fn fixture_store() -> TranslationStore {
        let store = TranslationStore::new(I18nConfig::new().supported_languages(["en", "ar"]));
        let en: serde_json::Value = serde_json::from_str(locale_fixtures::english_json()).unwrap();
        let ar: serde_json::Value = serde_json::from_str(locale_fixtures::arabic_json()).unwrap();
        store.load_translations([("en", en), ("ar", ar)]);
        store
    }

    #[tokio::test]
    async fn test_page_title_follows_direction() {
        let store = fixture_store();
        assert_eq!(store.page_title("profile", DEFAULT_PAGE_PREFIX), "Profile - MyApp");

        assert!(store.set_language("ar").await);
        assert_eq!(store.page_title("profile", DEFAULT_PAGE_PREFIX), "تطبيقي - الملف الشخصي");
    }

    #[test]
    fn test_plural_choice() {
        let store = fixture_store();
        assert_eq!(store.plural(1, "item.single", "item.plural"), "1 item");
        assert_eq!(store.plural(5, "item.single", "item.plural"), "5 items");
        assert_eq!(store.plural(0, "item.single", "item.plural"), "0 items");
    }
}
