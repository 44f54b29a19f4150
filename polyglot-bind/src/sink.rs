//! Render delivery surface.

use crate::request::ElementId;

/// Content sink bound elements render into.
///
/// The concrete write mechanism (DOM node, widget tree, test buffer) lives
/// with the caller; the controller only pushes finished text at it. In
/// production mode failed bindings push nothing and unrendered content is
/// left exactly as the caller had it.
pub trait RenderSink: Send + Sync {
    /// Deliver resolved text for one element.
    fn render(&self, element: &ElementId, text: &str);
}

impl<F> RenderSink for F
where
    F: Fn(&ElementId, &str) + Send + Sync,
{
    fn render(&self, element: &ElementId, text: &str) {
        self(element, text)
    }
}
