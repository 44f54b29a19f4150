//! Locale codes and allow-list validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A locale code selecting a string table (e.g. `"en_US"`).
///
/// Codes are opaque to the engine: no parsing, casing, or canonicalization is
/// applied. A code is usable only when the configured allow-list contains it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Create a locale from a code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The raw locale code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the code is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-sensitive exact membership test against the allow-list.
    ///
    /// Empty codes are always invalid.
    pub fn is_valid(&self, allow_list: &LocaleAllowList) -> bool {
        !self.0.is_empty() && allow_list.contains(self)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for Locale {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// The configured set of locales the engine may load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleAllowList(HashSet<Locale>);

impl LocaleAllowList {
    /// Build an allow-list from locale codes.
    pub fn new<I, L>(locales: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Locale>,
    {
        Self(locales.into_iter().map(Into::into).collect())
    }

    /// Exact membership test.
    pub fn contains(&self, locale: &Locale) -> bool {
        self.0.contains(locale)
    }

    /// Number of allowed locales.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no locales are allowed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the allowed locales.
    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.0.iter()
    }
}

impl<L: Into<Locale>> FromIterator<L> for LocaleAllowList {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self::new(iter)
    }
}
