//! # Polyglot Config
//!
//! Settings for the translation store and its lazy loader: schema, defaults,
//! file loading (YAML or TOML), `POLYGLOT_*` environment overrides, and
//! validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader, CONFIG_PATH_ENV};
pub use settings::{I18nSettings, Settings};
