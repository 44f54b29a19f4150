//! # Polyglot
//!
//! Client-side text localization for Rust applications: per-locale string
//! tables fetched asynchronously, `%{name}` placeholder interpolation, and a
//! controller that binds string identifiers to element targets and
//! re-renders them on locale switches.
//!
//! The engine is split into three layers, re-exported here:
//!
//! - [`polyglot_core`]: locales, string tables, argument parsing, template
//!   resolution; pure and synchronous.
//! - [`polyglot_loader`]: the configuration record, the shared locale cache,
//!   and the loader producing fan-out table futures over an injected
//!   transport.
//! - [`polyglot_bind`]: the controller binding string identifiers to
//!   elements and delivering rendered text through a sink.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use polyglot::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = EngineConfig::new()
//!         .with_locale("en_US")
//!         .with_valid_locales(LocaleAllowList::new(["en_US", "de_DE", "it_IT"]))
//!         .with_local_path("https://static.example.com/locales/");
//!
//!     let sink: Arc<dyn RenderSink> = Arc::new(|element: &ElementId, text: &str| {
//!         println!("{element}: {text}");
//!     });
//!     let controller =
//!         LocalizationController::new(config, Arc::new(HttpFetcher::new()), sink);
//!
//!     controller.bind(BindRequest::element("greeting", json!("helloString")));
//!     controller.bind(BindRequest::element(
//!         "name",
//!         json!({"stringid": "myNameIsString", "name": "John"}),
//!     ));
//!     controller.settled().await;
//!
//!     // Switch locale and re-render everything still bound.
//!     controller.bind(BindRequest::root("de_DE"));
//!     controller.rebind_all();
//!     controller.settled().await;
//! }
//! ```

// Re-export the engine layers
pub use polyglot_bind::*;
pub use polyglot_core::*;
pub use polyglot_loader::*;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        BindRequest, BindState, BindTarget, ElementId, EngineConfig, FetchResponse, FileFetcher,
        LoadState, Locale, LocaleAllowList, LocaleCache, LocalizationController, LocalizeError,
        MISSING_VALUE, RenderArgs, RenderSink, RenderSpec, StringFetcher, StringTable,
        StringTableLoader, TableFuture, resolve,
    };

    #[cfg(feature = "http")]
    pub use crate::HttpFetcher;
}
