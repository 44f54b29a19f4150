//! Engine configuration supplied once at startup.

use polyglot_core::{Locale, LocaleAllowList};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Locale loaded when a requested locale fails validation.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Dwell applied before a legacy-mode load settles, in milliseconds.
pub const DEFAULT_SETTLE_MILLS: u64 = 50;

/// Startup configuration record.
///
/// Field names mirror the bootstrap record delivered by the host page, so the
/// whole struct deserializes straight from that payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Locale loaded at startup.
    pub locale: Locale,

    /// Locales the engine accepts; everything else falls back to
    /// [`DEFAULT_LOCALE`].
    pub valid_locales: LocaleAllowList,

    /// When set, every locale's table is fetched from [`api_path`]
    /// instead of the templated local path.
    ///
    /// [`api_path`]: EngineConfig::api_path
    #[serde(rename = "loadFromAPI")]
    pub load_from_api: bool,

    /// Fixed endpoint used in API mode.
    pub api_path: String,

    /// Path prefix in local mode; a locale's table lives at
    /// `local_path + locale + ".json"`.
    pub local_path: String,

    /// Surface diagnostics and visible failure markers.
    pub debug: bool,

    /// Explicit settle dwell in milliseconds; overrides the legacy default.
    pub timeout_in_mills: Option<u64>,

    /// Keep the transport quirks of the legacy embedded browsers, including
    /// the default settle dwell.
    pub legacy_support: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locale: Locale::new(DEFAULT_LOCALE),
            valid_locales: LocaleAllowList::default(),
            load_from_api: false,
            api_path: String::new(),
            local_path: String::new(),
            debug: false,
            timeout_in_mills: None,
            legacy_support: false,
        }
    }
}

impl EngineConfig {
    /// Configuration with the default locale and an empty allow-list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the startup locale.
    pub fn with_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the locale allow-list.
    pub fn with_valid_locales(mut self, locales: LocaleAllowList) -> Self {
        self.valid_locales = locales;
        self
    }

    /// Fetch every table from a fixed API endpoint.
    pub fn with_api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = path.into();
        self.load_from_api = true;
        self
    }

    /// Resolve tables under a local path prefix.
    pub fn with_local_path(mut self, prefix: impl Into<String>) -> Self {
        self.local_path = prefix.into();
        self.load_from_api = false;
        self
    }

    /// Enable or disable debug diagnostics.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set an explicit settle dwell.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.timeout_in_mills = Some(delay.as_millis() as u64);
        self
    }

    /// Enable legacy transport behavior.
    pub fn with_legacy_support(mut self, legacy: bool) -> Self {
        self.legacy_support = legacy;
        self
    }

    /// Endpoint for one locale's string table.
    pub fn endpoint(&self, locale: &Locale) -> String {
        if self.load_from_api {
            self.api_path.clone()
        } else {
            format!("{}{}.json", self.local_path, locale)
        }
    }

    /// Minimum dwell before a load settles, if any.
    ///
    /// An explicit `timeoutInMills` applies in any mode; without one, the
    /// 50 ms default applies only under `legacySupport`.
    pub fn settle_delay(&self) -> Option<Duration> {
        match (self.timeout_in_mills, self.legacy_support) {
            (Some(mills), _) => Some(Duration::from_millis(mills)),
            (None, true) => Some(Duration::from_millis(DEFAULT_SETTLE_MILLS)),
            (None, false) => None,
        }
    }

    /// The fallback locale.
    pub fn default_locale(&self) -> Locale {
        Locale::new(DEFAULT_LOCALE)
    }
}
