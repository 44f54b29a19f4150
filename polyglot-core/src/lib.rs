//! Core types for the Polyglot localization engine.
//!
//! Everything in this crate is pure and synchronous: locale codes and their
//! allow-list validation, immutable per-locale string tables, the
//! substitution-argument model, and `%{name}` template resolution. The
//! asynchronous loading machinery lives in `polyglot-loader`, and element
//! binding in `polyglot-bind`.

mod args;
mod error;
mod locale;
mod table;
mod template;

pub use args::{RenderArgs, RenderSpec};
pub use error::{LocalizeError, Result};
pub use locale::{Locale, LocaleAllowList};
pub use table::StringTable;
pub use template::{MISSING_VALUE, resolve};
