//! # Polyglot Common
//!
//! Shared error types, logging bootstrap, and test helpers used by every
//! crate in the Polyglot workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{PolyglotError, Result};
pub use logging::{init_default_logging, init_dev_logging, init_logging, init_prod_logging, LoggingConfig};
