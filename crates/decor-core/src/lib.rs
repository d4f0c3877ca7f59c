//! # decor-core: Pure Pricing Logic for Decorated Apparel
//!
//! This crate turns a garment cost, an order quantity and a decoration
//! description into a per-unit sell price. It contains all pricing rules
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Decor Pricing Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Callers (quote binary, order desk, web)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PricingRequest + &RateTables          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ decor-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  engine   │  │ strategy  │  │   tier    │  │ rounding  │  │   │
//! │  │   │ dispatch  │─►│ 5 methods │─►│ resolver  │  │  $0.50 up │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   money   │  │   rates   │  │   quote   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CACHING • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │          decor-rates (upstream schemas, config, loading)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Requests, tiers, specs and breakdowns
//! - [`money`] - Decimal-backed Money type
//! - [`rates`] - Canonical rate tables and cost lookups
//! - [`tier`] - Tier resolution, DTG synthetic tier, partition check
//! - [`rounding`] - Half-dollar round up and cent flooring
//! - [`strategy`] - One pricing strategy per decoration method
//! - [`engine`] - The `compute_price` facade
//! - [`quote`] - Multi-product quotes priced on aggregate quantity
//! - [`error`] - Domain error types
//! - [`validation`] - Request boundary checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same request and rates = same breakdown
//! 2. **Fail Closed**: missing rate data is an error, never a default price
//! 3. **Round Once**: components stay exact until the final half-dollar round up
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use decor_core::money::Money;
//! use decor_core::rounding::round_up;
//!
//! // $3.53 blank at a 0.6 margin denominator
//! let garment = Money::from_cents(353)
//!     .checked_div(rust_decimal_macros::dec!(0.6))
//!     .unwrap();
//! assert_eq!(garment.cents(), 588);
//!
//! // Garment + $11.00 embroidery, rounded up to the next half dollar
//! assert_eq!(round_up(garment + Money::from_cents(1100)), Money::from_cents(1700));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod money;
pub mod quote;
pub mod rates;
pub mod rounding;
pub mod strategy;
pub mod tier;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use decor_core::Money` instead of
// `use decor_core::money::Money`

pub use engine::{compute_price, PriceEngine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quote::{price_quote, QuoteLine, QuoteSummary};
pub use rates::RateTables;
pub use strategy::PricingStrategy;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum pieces in a single pricing request.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000000 instead of 100)
/// and keeps `unit_price × quantity` far from overflow.
pub const MAX_ORDER_QUANTITY: i64 = 999_999;

/// Maximum blank garment cost, in cents ($1,000,000).
///
/// Blank garments cost a few dollars; anything near this bound is a typo.
/// Together with `MAX_ORDER_QUANTITY` it keeps every price sum inside exact
/// decimal range for sane rate data.
pub const MAX_GARMENT_COST_CENTS: i64 = 100_000_000;
