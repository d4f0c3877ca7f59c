//! # Validation Module
//!
//! Boundary checks applied before any rate table is touched.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: decor-rates (loading)                                         │
//! │  └── Rate table shape, tier partition, margin range                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: PriceEngine boundary                                          │
//! │  └── THIS MODULE: garment cost and quantity                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Strategies                                                    │
//! │  └── Method-specific spec checks (stitches, colors, locations)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use decor_core::money::Money;
//! use decor_core::validation::{validate_garment_cost, validate_quantity};
//!
//! validate_quantity(48).unwrap();
//! validate_garment_cost(Money::from_cents(353)).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_GARMENT_COST_CENTS, MAX_ORDER_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an order quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ORDER_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ORDER_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ORDER_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a blank garment cost. Zero is not a real cost.
///
/// ## Rules
/// - Must be positive
/// - Must not exceed MAX_GARMENT_COST_CENTS
pub fn validate_garment_cost(cost: Money) -> ValidationResult<()> {
    if !cost.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "garment_cost".to_string(),
        });
    }

    // Compared as Money: converting a huge cost to cents would saturate.
    if cost > Money::from_cents(MAX_GARMENT_COST_CENTS) {
        return Err(ValidationError::OutOfRange {
            field: "garment_cost (cents)".to_string(),
            min: 1,
            max: MAX_GARMENT_COST_CENTS,
        });
    }

    Ok(())
}

/// Validates that a list the caller must fill is not empty.
pub fn validate_not_empty<T>(items: &[T], field: &str) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
