//! Unified error type for the Catpoint controller.
//!
//! Every fallible entry point returns [`Result`].  Store and configuration
//! failures are carried through unchanged; classifier failures never reach
//! this type because the service absorbs them.

use crate::app::ports::StoreError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The status store failed to read or persist.
    #[error("store: {0}")]
    Store(#[from] StoreError),

    /// Configuration is invalid or could not be loaded.
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// A caller supplied a value outside the closed set the controller knows.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid JSON for [`SecurityConfig`](crate::config::SecurityConfig).
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field failed range validation.  Describes which field and why.
    #[error("validation failed: {0}")]
    ValidationFailed(&'static str),
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse one of the closed status enums, naming the field on failure.
pub fn parse_enum<T: core::str::FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("unknown {field} '{raw}'")))
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
