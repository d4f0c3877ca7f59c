//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    ceil((5.00 + 0.1 + 0.2) * 2) / 2 can jump a whole half dollar        │
//! │                                                                         │
//! │  Integer cents are not enough either:                                   │
//! │    $3.53 / 0.6 = $5.88333...  → fractional cents                        │
//! │                                                                         │
//! │  OUR SOLUTION: Base-10 Decimal dollars                                  │
//! │    3.53 / 0.6 = 5.8833333333333333333333333333 (exact to 28 digits)     │
//! │    Rounding happens ONCE, explicitly, at the end                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use decor_core::money::Money;
//!
//! // Create from cents (preferred)
//! let cost = Money::from_cents(353); // $3.53
//!
//! // Arithmetic operations
//! let doubled = cost * 2;                         // $7.06
//! let total = cost + Money::from_cents(500);      // $8.53
//! assert_eq!(total.ceil_to_half_dollar(), Money::from_cents(900));
//!
//! // NEVER do this:
//! // let bad = Money::from_float(3.53); // NO SUCH METHOD EXISTS!
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in dollars, held as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal (signed)**: Allows negative stitch adjustments below the base
/// - **Single field tuple struct**: Zero-cost abstraction over `Decimal`
/// - **Derives**: Full serde support (serialized as a JSON number)
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  garment cost ──► ÷ margin ──┐                                          │
/// │  decoration cost ────────────┤                                          │
/// │  labor / freight ────────────┼──► raw subtotal ──► ceil to $0.50        │
/// │  LTM fee ÷ quantity ─────────┘                        │                 │
/// │                                                       ▼                 │
/// │                                                  unit price             │
/// │                                                                         │
/// │  EVERY monetary value in the pricing core flows through this type      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] Decimal);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use decor_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Creates a Money value from a decimal dollar amount.
    ///
    /// ## Example
    /// ```rust
    /// use decor_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let price = Money::from_decimal(dec!(5.25));
    /// assert_eq!(price.cents(), 525);
    /// ```
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the exact dollar amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the value in whole cents, rounding half away from zero.
    ///
    /// ## Note
    /// For reporting only. Pricing math never goes through this.
    pub fn cents(&self) -> i64 {
        let cents = (self.0 * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        cents.to_i64().unwrap_or(if cents.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use decor_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert_eq!(zero.cents(), 0);
    /// assert!(zero.is_zero());
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use decor_core::money::Money;
    ///
    /// let labor = Money::from_cents(200); // $2.00 per location
    /// assert_eq!(labor.multiply_quantity(3).cents(), 600);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Multiplies by a quantity. Returns `None` on overflow.
    #[inline]
    pub fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Adds two amounts. Returns `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Divides by a decimal divisor. Returns `None` for a zero divisor or
    /// overflow.
    ///
    /// ## Example
    /// ```rust
    /// use decor_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// // Garment markup: $3.00 / 0.6 = $5.00
    /// let marked_up = Money::from_cents(300).checked_div(dec!(0.6)).unwrap();
    /// assert_eq!(marked_up, Money::from_cents(500));
    /// ```
    #[inline]
    pub fn checked_div(&self, divisor: Decimal) -> Option<Self> {
        self.0.checked_div(divisor).map(Money)
    }

    /// Rounds UP to the next multiple of $0.50.
    ///
    /// ## The Half-Dollar Rule
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  whole dollars + (0.00 | 0.50 | 1.00) by the fractional part        │
    /// │                                                                     │
    /// │    $9.01 → $9.50      $9.50 → $9.50 (already a multiple)           │
    /// │    $9.51 → $10.00     $0.00 → $0.00                                 │
    /// │                                                                     │
    /// │  Never rounds down. Idempotent.                                     │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// Works from the fractional part instead of `ceil(x × 2) / 2`, so it
    /// cannot overflow: a value with a fractional part is far below
    /// `Decimal::MAX`, and whole values come back unchanged.
    pub fn ceil_to_half_dollar(&self) -> Self {
        let whole = self.0.floor();
        let fraction = self.0 - whole;
        if fraction.is_zero() {
            Money(self.0)
        } else if fraction <= Decimal::new(5, 1) {
            Money(whole + Decimal::new(5, 1))
        } else {
            Money(whole + Decimal::ONE)
        }
    }

    /// Truncates DOWN to whole cents.
    ///
    /// ## Example
    /// ```rust
    /// use decor_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// // $50 / 18 = 2.777... → $2.77, never $2.78
    /// let per_unit = Money::from_cents(5000).checked_div(dec!(18)).unwrap();
    /// assert_eq!(per_unit.floor_to_cent(), Money::from_cents(277));
    /// ```
    pub fn floor_to_cent(&self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money rounded to cents.
///
/// ## Note
/// This is for debugging and logs. Presentation formatting belongs to the UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let rounded = self
            .0
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{}${:.2}", sign, rounded)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a count (locations, quantity).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
