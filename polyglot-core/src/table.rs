//! Immutable per-locale string tables.

use crate::error::{LocalizeError, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Mapping from string identifier to template string for one locale.
///
/// A table is immutable once built: a locale switch replaces the active table
/// wholesale, it is never patched in place. Lookups are by exact key and a
/// missing key is a defined, non-fatal outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    strings: HashMap<String, String>,
}

impl StringTable {
    /// Parse a table from a flat JSON object payload.
    ///
    /// The payload contract is a single object whose values are all strings;
    /// nesting, arrays, and non-string values are rejected.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| LocalizeError::Parse(e.to_string()))?;
        let Value::Object(entries) = value else {
            return Err(LocalizeError::Parse(
                "string table must be a JSON object".to_string(),
            ));
        };

        let mut strings = HashMap::with_capacity(entries.len());
        for (id, template) in entries {
            match template {
                Value::String(template) => {
                    strings.insert(id, template);
                }
                other => {
                    return Err(LocalizeError::Parse(format!(
                        "value for \"{id}\" must be a string, got {other}"
                    )));
                }
            }
        }
        Ok(Self { strings })
    }

    /// Look up a template string by identifier.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.strings.get(id).map(String::as_str)
    }

    /// Whether the table contains an identifier.
    pub fn contains(&self, id: &str) -> bool {
        self.strings.contains_key(id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over all string identifiers.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }
}

impl FromIterator<(String, String)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            strings: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for StringTable {
    fn from(entries: [(&str, &str); N]) -> Self {
        entries
            .into_iter()
            .map(|(id, template)| (id.to_string(), template.to_string()))
            .collect()
    }
}
