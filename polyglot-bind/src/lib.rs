//! Element binding and render orchestration for the Polyglot engine.
//!
//! The [`LocalizationController`] accepts [`BindRequest`]s, attaches each one
//! to the active locale's table future, and delivers resolved text through an
//! injected [`RenderSink`]. A request addressed at the document root is a
//! locale-switch command rather than a render request. Bindings stay
//! registered until [`unsubscribe`] so a later locale switch can re-render
//! them with [`rebind_all`].
//!
//! [`unsubscribe`]: LocalizationController::unsubscribe
//! [`rebind_all`]: LocalizationController::rebind_all

mod controller;
mod request;
mod sink;

pub use controller::{BindState, LocalizationController};
pub use request::{BindRequest, BindTarget, ElementId};
pub use sink::RenderSink;
