//! # Rounding Policy
//!
//! The single rule for final prices: round UP to the next $0.50.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  round_up(x) = ceil(x × 2) / 2                                          │
//! │                                                                         │
//! │  Applied exactly once per price, after garment + decoration + labor    │
//! │  + freight + LTM-per-unit have been summed.                            │
//! │                                                                         │
//! │  NOT the same thing as floor_to_cent, which some strategies apply to   │
//! │  the LTM share BEFORE summing. The two never substitute for each other.│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;

/// Rounds a raw subtotal up to the nearest half dollar.
///
/// ## Example
/// ```rust
/// use decor_core::money::Money;
/// use decor_core::rounding::round_up;
///
/// assert_eq!(round_up(Money::from_cents(1388)), Money::from_cents(1400));
/// assert_eq!(round_up(Money::from_cents(1350)), Money::from_cents(1350));
/// ```
#[inline]
pub fn round_up(amount: Money) -> Money {
    amount.ceil_to_half_dollar()
}

/// Truncates an LTM share to whole cents so the per-unit shares never sum
/// to more than the fee.
#[inline]
pub fn floor_to_cent(amount: Money) -> Money {
    amount.floor_to_cent()
}

// =============================================================================
// Unit Tests
// =============================================================================
