//! Bind requests and their targets.

use serde_json::Value;
use std::fmt;

/// Opaque handle naming a bound element.
///
/// The engine never interprets the value; it only keys the binding registry
/// and is echoed back through the render sink.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    /// Create an element handle.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw handle value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Where a bind request is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindTarget {
    /// A leaf element: render a string into it.
    Element(ElementId),
    /// The document root: interpret the request as a locale-switch command.
    Root,
}

/// One render or locale-switch request.
///
/// Ephemeral: created per call and discarded once its resolution completes
/// or fails. `params` carries the polymorphic request surface (a bare
/// string identifier, a sequence with positional values, or a mapping with a
/// `stringid` key), parsed exactly once at the boundary.
#[derive(Debug, Clone)]
pub struct BindRequest {
    /// Addressee of the request.
    pub target: BindTarget,
    /// Raw request payload.
    pub params: Value,
}

impl BindRequest {
    /// Render request addressed at an element.
    pub fn element(id: impl Into<ElementId>, params: Value) -> Self {
        Self {
            target: BindTarget::Element(id.into()),
            params,
        }
    }

    /// Locale-switch command addressed at the document root.
    pub fn root(locale: impl Into<String>) -> Self {
        Self {
            target: BindTarget::Root,
            params: Value::String(locale.into()),
        }
    }
}
