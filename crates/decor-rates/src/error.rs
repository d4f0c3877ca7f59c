//! # Rates Error Types
//!
//! Error types for loading and validating rate bundles.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / ConfigError                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RatesError (this module) ← Adds file path and field context           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  quote binary exits non-zero with the message                          │
//! │                                                                         │
//! │  Schema problems are NEVER patched with a default value.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use decor_core::CoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// Rate loading errors.
#[derive(Debug, Error)]
pub enum RatesError {
    /// A bundle file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A bundle did not match its upstream schema.
    ///
    /// ## When This Occurs
    /// - A required field (`tiersR`, `TierLabel`, ...) is missing
    /// - A field has the wrong JSON type
    #[error("Malformed {what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// A field parsed but holds an unusable value.
    ///
    /// ## When This Occurs
    /// - Margin denominator outside (0, 1]
    /// - Negative cost or fee
    /// - Unknown screen-print `CostType`
    /// - Rows of one stitch bucket disagree on their per-thousand rate
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// A cost row refers to a tier label the tier table does not have.
    #[error("Cost row refers to unknown tier '{label}'")]
    UnknownTier { label: String },

    /// A table that must have rows is empty.
    #[error("{table} has no rows")]
    EmptyTable { table: String },

    /// No bundle file was found for any method.
    #[error("No rate bundles found in {dir}")]
    NoBundles { dir: PathBuf },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The converted tables failed a core check (partition, synthetic tier).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl RatesError {
    /// Creates an InvalidField error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RatesError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for rate loading.
pub type RatesResult<T> = Result<T, RatesError>;
