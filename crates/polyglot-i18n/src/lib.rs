//! Translation store for Polyglot
//!
//! This crate resolves strings by key across languages. It includes:
//!
//! - Nested documents flattened into dot-joined keys
//! - A current → fallback → default resolution chain
//! - `{name}` parameters whose values may themselves be keys
//! - Tokenizing of a small tag markup (`<b>x</b>`, `<br>`)
//! - Right-to-left classification
//! - Language switching with persistence and change subscribers
//! - Lazy per-language loading from files or URLs, with deduplication
//!
//! # Example
//!
//! ```rust
//! use polyglot_i18n::{params, I18nConfig, TranslationStore};
//! use serde_json::json;
//!
//! let store = TranslationStore::new(I18nConfig::new().default_language("en"));
//! store.load_language("en", json!({
//!     "greet": "Hi {name}",
//!     "msg": "{n} items",
//!     "n": "5",
//! }));
//!
//! assert_eq!(store.t_with("greet", &params!["name" => "Sam"]), "Hi Sam");
//! assert_eq!(store.t_with("msg", &params!["n" => "n"]), "5 items");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod direction;
pub mod document;
pub mod error;
pub mod global;
pub mod helpers;
pub mod loader;
pub mod params;
pub mod storage;
pub mod store;
pub mod subscription;
pub mod tokenizer;
pub mod transport;

pub use config::I18nConfig;
pub use direction::RtlLanguages;
pub use document::{FlatTable, TranslationNode};
pub use error::{I18nError, I18nResult};
pub use global::{
    create_lazy_loader, global, install, setup, setup_from_env, setup_from_settings,
    setup_from_settings_file, setup_lazy,
};
pub use loader::LazyLoader;
pub use params::{substitute, Params};
pub use storage::{FileStorage, MemoryStorage, Storage, LANGUAGE_STORAGE_KEY};
pub use store::TranslationStore;
pub use subscription::{LanguageChangeCallback, Subscription};
pub use tokenizer::TranslationToken;
pub use transport::{fetch_translations, select_transport, DocumentFormat, FileTransport, Transport};

#[cfg(feature = "http")]
pub use transport::HttpTransport;
