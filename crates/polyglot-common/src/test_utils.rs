//! Test utilities and shared test helpers for Polyglot.
//!
//! Enabled for this crate's own tests and for dependents through the
//! `testing` feature.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `(relative path, contents)` pairs under `dir`, creating parent
/// directories as needed. Returns the written paths in input order.
pub fn write_files(dir: &Path, files: &[(&str, &str)]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|(name, contents)| {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("Failed to create fixture directory");
            }
            fs::write(&path, contents).expect("Failed to write fixture file");
            path
        })
        .collect()
}

/// Locale fixtures shared by integration tests.
pub mod locale_fixtures {
    /// A nested English document in JSON form.
    pub fn english_json() -> &'static str {
        r#"{
  "app": { "name": "MyApp" },
  "page": { "profile": "Profile" },
  "greeting": "Hello, {name}!",
  "item": { "single": "{count} item", "plural": "{count} items" }
}"#
    }

    /// A nested Arabic document in JSON form.
    pub fn arabic_json() -> &'static str {
        r#"{
  "app": { "name": "تطبيقي" },
  "page": { "profile": "الملف الشخصي" },
  "greeting": "مرحبا {name}"
}"#
    }

    /// A French document in YAML form.
    pub fn french_yaml() -> &'static str {
        "app:\n  name: MonApp\ngreeting: \"Bonjour, {name} !\"\n"
    }
}
