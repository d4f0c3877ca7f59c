//! # Error Types
//!
//! Domain-specific error types for decor-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  decor-core errors (this file)                                         │
//! │  ├── CoreError        - Pricing failures (fail-closed, never a default) │
//! │  └── ValidationError  - Request boundary checks                        │
//! │                                                                         │
//! │  decor-rates errors (separate crate)                                   │
//! │  └── RatesError       - Upstream schema / config / IO failures         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → RatesError → quote output         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (quantity, key, tier label)
//! 3. Errors are enum variants, never String
//! 4. Nothing here is retried: every variant is a data problem

use thiserror::Error;

use crate::types::DecorationMethod;

// =============================================================================
// Core Error
// =============================================================================

/// Pricing computation errors.
///
/// Every variant is returned to the immediate caller. The core never
/// substitutes a fallback price for missing or malformed rate data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No tier row contains the quantity.
    #[error("No pricing tier covers quantity {quantity}")]
    NoTierForQuantity { quantity: i64 },

    /// More than one tier row contains the quantity.
    ///
    /// ## When This Occurs
    /// - Upstream returned overlapping rows (e.g. "24-47" and "24-71")
    /// - A row was duplicated
    ///
    /// Picking the first match would silently mask the bad data.
    #[error("Quantity {quantity} matches more than one tier: {labels:?}")]
    AmbiguousTier { quantity: i64, labels: Vec<String> },

    /// The rate tables carry nothing for this decoration method.
    #[error("No rate tables loaded for {method}")]
    MissingTierData { method: DecorationMethod },

    /// A tier row exists but cannot be used.
    ///
    /// ## When This Occurs
    /// - Margin denominator outside (0, 1]
    /// - Negative LTM fee
    /// - `max_qty` below `min_qty`
    /// - A synthetic tier borrows from a label that does not exist
    #[error("Tier '{label}' is invalid: {reason}")]
    InvalidTierData { label: String, reason: String },

    /// Two tier rows cover the same quantities.
    #[error("Tiers '{first}' and '{second}' overlap")]
    TierOverlap { first: String, second: String },

    /// Quantities between two consecutive tier rows are not covered.
    #[error("No tier covers quantities {from} through {to}")]
    TierGap { from: i64, to: i64 },

    /// No decoration cost row for a location / size / bucket at this quantity.
    #[error("No cost data for '{key}' at quantity {quantity}")]
    MissingLocationOrSizeData { key: String, quantity: i64 },

    /// More than one decoration cost row matches.
    #[error("Cost data for '{key}' at quantity {quantity} is ambiguous")]
    AmbiguousCostData { key: String, quantity: i64 },

    /// No freight row contains the quantity (DTF only).
    #[error("No freight data for quantity {quantity}")]
    MissingFreightData { quantity: i64 },

    /// The decoration spec cannot be priced as given.
    ///
    /// ## When This Occurs
    /// - Zero DTF transfer locations
    /// - Zero DTG print locations
    /// - Zero screen-print colors
    /// - LTM reference quantity of zero
    #[error("Invalid decoration spec: {reason}")]
    InvalidDecorationSpec { reason: String },

    /// A price sum left the range of exact decimal arithmetic.
    ///
    /// ## When This Occurs
    /// - Rate data so large (or a margin so small) that the marked-up
    ///   subtotal or a quote line total no longer fits
    #[error("Price arithmetic overflowed while computing {stage}")]
    PriceOverflow { stage: String },

    /// Request failed boundary validation (wraps ValidationError).
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the `compute_price` boundary, before any strategy runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::AmbiguousTier {
            quantity: 30,
            labels: vec!["24-47".to_string(), "24-71".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Quantity 30 matches more than one tier: [\"24-47\", \"24-71\"]"
        );

        let err = CoreError::MissingTierData {
            method: DecorationMethod::Dtf,
        };
        assert_eq!(err.to_string(), "No rate tables loaded for DTF");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "location_codes".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::InvalidInput(_)));
    }
}
