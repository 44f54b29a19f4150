//! Asynchronous string-table acquisition for the Polyglot engine.
//!
//! A [`StringTableLoader`] fetches one locale's table through an injected
//! [`StringFetcher`] transport, parses it, and publishes it to the shared
//! [`LocaleCache`]. Every load hands out a [`TableFuture`], a shared future
//! that any number of bindings can attach to; all of them observe the same
//! eventual table or the same failure.
//!
//! The [`EngineConfig`] record decides where tables come from (templated
//! local path or a fixed API path), which locales are allowed, and whether a
//! settle dwell delays the visible resolution moment.

mod cache;
mod config;
mod fetch;
mod loader;

pub use cache::{CacheSnapshot, LoadState, LocaleCache};
pub use config::{DEFAULT_LOCALE, DEFAULT_SETTLE_MILLS, EngineConfig};
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fetch::{FetchResponse, FileFetcher, StringFetcher};
pub use loader::{StringTableLoader, TableFuture};
