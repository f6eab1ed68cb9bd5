//! Right-to-left language classification

use polyglot_config::defaults::DEFAULT_RTL_LANGUAGES;
use std::collections::BTreeSet;

/// Set of two-letter prefixes classified as right-to-left.
///
/// A language is RTL when its lowercased first two characters are in the set,
/// so `"AR"`, `"ar"` and `"ar-EG"` all match `"ar"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtlLanguages {
    prefixes: BTreeSet<String>,
}

impl RtlLanguages {
    /// Build from arbitrary codes; each is normalized to its prefix
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            prefixes: codes.into_iter().map(|c| prefix(c.as_ref())).collect(),
        }
    }

    /// Add a code to the set
    pub fn insert(&mut self, code: &str) -> bool {
        self.prefixes.insert(prefix(code))
    }

    /// Whether `lang` is right-to-left
    pub fn is_rtl(&self, lang: &str) -> bool {
        self.prefixes.contains(&prefix(lang))
    }

    /// Prefixes in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }
}

impl Default for RtlLanguages {
    fn default() -> Self {
        Self::new(DEFAULT_RTL_LANGUAGES)
    }
}

fn prefix(lang: &str) -> String {
    lang.to_lowercase().chars().take(2).collect()
}
