//! Error types for the localization engine.

use thiserror::Error;

/// Errors produced while resolving, loading, or binding localized strings.
///
/// None of these are fatal: every variant has a defined fallback at the site
/// that observes it. The enum is `Clone`: a load failure is fanned out
/// through a shared future to every binding attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalizeError {
    /// Requested locale is not in the configured allow-list.
    #[error("locale \"{0}\" is invalid")]
    InvalidLocale(String),

    /// Network or HTTP failure while fetching a string table.
    #[error("could not load localization file {endpoint}: {reason}")]
    Transport {
        /// Endpoint the load was issued against.
        endpoint: String,
        /// HTTP status, when the failure carried one.
        status: Option<u16>,
        /// Human-readable failure description.
        reason: String,
    },

    /// String-table payload was not a flat string-to-string JSON object.
    #[error("failed to parse string table: {0}")]
    Parse(String),

    /// String identifier absent from the loaded table.
    #[error("no translation found for string \"{0}\"")]
    MissingStringId(String),

    /// Substitution arguments were neither a sequence nor a mapping.
    #[error("invalid argument shape: {0}")]
    InvalidArgsShape(String),

    /// Render request carried no string identifier at all.
    #[error("missing string identifier")]
    MissingStringIdentifier,
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, LocalizeError>;
