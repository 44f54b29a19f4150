//! Substitution arguments and request-boundary parsing.

use crate::error::{LocalizeError, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Substitution values for one render request.
///
/// The shape is fixed here, at the request boundary; nothing downstream
/// re-inspects runtime types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RenderArgs {
    /// No arguments supplied; placeholders are left verbatim.
    #[default]
    None,
    /// Values consumed by placeholder occurrence order.
    Positional(Vec<String>),
    /// Values looked up by placeholder name.
    Named(HashMap<String, String>),
}

impl RenderArgs {
    /// Build positional arguments.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Build named arguments from key/value pairs.
    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Named(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Whether no arguments were supplied.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A parsed render request: string identifier plus substitution values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSpec {
    /// Identifier looked up in the active string table.
    pub string_id: String,
    /// Substitution values applied to the found template.
    pub args: RenderArgs,
}

impl RenderSpec {
    /// A request with an identifier and no arguments.
    pub fn new(string_id: impl Into<String>) -> Self {
        Self {
            string_id: string_id.into(),
            args: RenderArgs::None,
        }
    }

    /// Attach arguments to the request.
    pub fn with_args(mut self, args: RenderArgs) -> Self {
        self.args = args;
        self
    }

    /// Parse the polymorphic render-request surface.
    ///
    /// Accepted shapes:
    /// - a bare string: the identifier alone, no arguments;
    /// - a sequence `[id, v1, v2, ...]`: identifier plus positional values;
    /// - a mapping with a `"stringid"` key: identifier plus named values
    ///   taken from the remaining entries.
    ///
    /// A sequence or mapping without a string identifier is
    /// [`LocalizeError::MissingStringIdentifier`]; any other value is
    /// [`LocalizeError::InvalidArgsShape`]. Non-string substitution values
    /// are rendered through their JSON representation.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(id) => Ok(Self::new(id.clone())),
            Value::Array(items) => {
                let Some(Value::String(id)) = items.first() else {
                    return Err(LocalizeError::MissingStringIdentifier);
                };
                let values = items[1..].iter().map(coerce).collect();
                Ok(Self::new(id.clone()).with_args(RenderArgs::Positional(values)))
            }
            Value::Object(entries) => {
                let Some(Value::String(id)) = entries.get("stringid") else {
                    return Err(LocalizeError::MissingStringIdentifier);
                };
                let pairs = entries
                    .iter()
                    .filter(|(key, _)| key.as_str() != "stringid")
                    .map(|(key, value)| (key.clone(), coerce(value)))
                    .collect();
                Ok(Self::new(id.clone()).with_args(RenderArgs::Named(pairs)))
            }
            other => Err(LocalizeError::InvalidArgsShape(format!(
                "expected string, sequence, or mapping, got {other}"
            ))),
        }
    }
}

/// Render a substitution value as text.
fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
