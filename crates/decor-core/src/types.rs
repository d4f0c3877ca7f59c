//! # Domain Types
//!
//! Request, tier and breakdown types used throughout the pricing core.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PricingRequest  │   │  QuantityTier   │   │ PriceBreakdown  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  garment_cost   │   │  label          │   │  tier_label     │       │
//! │  │  quantity       │   │  min/max qty    │   │  unit_price     │       │
//! │  │  decoration ────┼─┐ │  margin denom   │   │  components...  │       │
//! │  └─────────────────┘ │ │  ltm_fee        │   │  rounded_from   │       │
//! │                      │ └─────────────────┘   └─────────────────┘       │
//! │                      ▼                                                  │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │ DecorationSpec                                                 │    │
//! │  │  Embroidery | CapEmbroidery  { stitch_count, ltm_distribution } │    │
//! │  │  Dtg         { location_codes }                                │    │
//! │  │  Dtf         { transfer_size_keys }                            │    │
//! │  │  ScreenPrint { color_count }                                   │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these are immutable value objects: created per call, never
//! mutated by the core.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Decoration Method
// =============================================================================

/// The five decoration methods the core can price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DecorationMethod {
    Embroidery,
    CapEmbroidery,
    Dtg,
    Dtf,
    ScreenPrint,
}

impl fmt::Display for DecorationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecorationMethod::Embroidery => "Embroidery",
            DecorationMethod::CapEmbroidery => "Cap Embroidery",
            DecorationMethod::Dtg => "DTG",
            DecorationMethod::Dtf => "DTF",
            DecorationMethod::ScreenPrint => "Screen Print",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Margin Denominator
// =============================================================================

/// Divisor applied to garment cost: `marked_up = cost / d`.
///
/// ## Why a newtype?
/// `0 < d <= 1` is the only range that produces a markup. Zero would
/// divide by zero and anything above one would sell below cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct MarginDenominator(Decimal);

impl MarginDenominator {
    /// Creates a margin denominator, rejecting values outside (0, 1].
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO && value <= Decimal::ONE {
            Some(MarginDenominator(value))
        } else {
            None
        }
    }

    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for MarginDenominator {
    type Error = String;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        MarginDenominator::try_new(value)
            .ok_or_else(|| format!("margin denominator {value} is outside (0, 1]"))
    }
}

impl From<MarginDenominator> for Decimal {
    fn from(margin: MarginDenominator) -> Self {
        margin.0
    }
}

// =============================================================================
// Quantity Tier
// =============================================================================

/// A quantity range with its margin and least-than-minimum fee.
///
/// `max_qty = None` means unbounded ("72+").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityTier {
    pub label: String,
    pub min_qty: i64,
    pub max_qty: Option<i64>,
    pub margin_denominator: MarginDenominator,
    pub ltm_fee: Money,
}

impl QuantityTier {
    /// Checks whether the quantity falls inside this tier.
    #[inline]
    pub fn contains(&self, quantity: i64) -> bool {
        quantity >= self.min_qty && self.max_qty.map_or(true, |max| quantity <= max)
    }

    /// A tier carrying a positive fee is a least-than-minimum tier.
    #[inline]
    pub fn has_ltm_fee(&self) -> bool {
        self.ltm_fee.is_positive()
    }
}

// =============================================================================
// Rate Rows
// =============================================================================

/// One decoration cost row: a location, transfer size, stitch bucket or
/// color count, priced for one quantity range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationCostEntry {
    pub key: String,
    pub min_qty: i64,
    pub max_qty: Option<i64>,
    pub unit_cost: Money,
}

impl DecorationCostEntry {
    #[inline]
    pub fn contains(&self, quantity: i64) -> bool {
        quantity >= self.min_qty && self.max_qty.map_or(true, |max| quantity <= max)
    }
}

/// Freight cost per transfer for one quantity range (DTF only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreightEntry {
    pub min_qty: i64,
    pub max_qty: Option<i64>,
    pub cost_per_unit: Money,
}

impl FreightEntry {
    #[inline]
    pub fn contains(&self, quantity: i64) -> bool {
        quantity >= self.min_qty && self.max_qty.map_or(true, |max| quantity <= max)
    }
}

// =============================================================================
// Decoration Specs
// =============================================================================

/// Which quantity the embroidery LTM fee is divided by.
///
/// ## Why explicit?
/// Order entry divides by the real order quantity. The pricing table
/// view divides by a separately chosen reference quantity (e.g. "show the
/// 1-7 row as if 3 pieces were ordered"). Both are legitimate, so the
/// caller must say which one it means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LtmDistribution {
    /// Divide by the request's quantity.
    ActualQuantity,
    /// Divide by this quantity instead.
    ReferenceQuantity(i64),
}

/// Embroidery and cap embroidery decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EmbroiderySpec {
    /// Stitch count of the primary logo.
    pub stitch_count: i64,
    pub ltm_distribution: LtmDistribution,
    /// Stitch counts of any additional logos (back, sleeve, ...).
    #[serde(default)]
    pub additional_logos: Vec<i64>,
}

/// Direct-to-garment decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DtgSpec {
    /// Print location codes. A code like `LC_FB` names a combined placement.
    pub location_codes: Vec<String>,
}

/// Direct-to-film transfer decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DtfSpec {
    /// One transfer size key per physical location.
    pub transfer_size_keys: Vec<String>,
}

/// Screen print decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScreenPrintSpec {
    /// Colors in the primary location.
    pub color_count: i64,
    /// Color counts of additional print locations.
    #[serde(default)]
    pub additional_locations: Vec<i64>,
}

/// Decoration specification, one variant per method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum DecorationSpec {
    Embroidery(EmbroiderySpec),
    CapEmbroidery(EmbroiderySpec),
    Dtg(DtgSpec),
    Dtf(DtfSpec),
    ScreenPrint(ScreenPrintSpec),
}

impl DecorationSpec {
    /// Returns the method this spec is priced by.
    pub fn method(&self) -> DecorationMethod {
        match self {
            DecorationSpec::Embroidery(_) => DecorationMethod::Embroidery,
            DecorationSpec::CapEmbroidery(_) => DecorationMethod::CapEmbroidery,
            DecorationSpec::Dtg(_) => DecorationMethod::Dtg,
            DecorationSpec::Dtf(_) => DecorationMethod::Dtf,
            DecorationSpec::ScreenPrint(_) => DecorationMethod::ScreenPrint,
        }
    }
}

// =============================================================================
// Pricing Request
// =============================================================================

/// A single pricing request: one garment cost, one quantity, one decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    /// Blank garment cost (must be positive).
    pub garment_cost: Money,
    /// Order quantity (must be positive).
    pub quantity: i64,
    pub decoration: DecorationSpec,
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// The itemized result of one price computation.
///
/// ## Invariant
/// `unit_price = ceil_to_half_dollar(rounded_from)` and
/// `rounded_from = garment + decoration + labor + freight + ltm_fee_per_unit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub method: DecorationMethod,
    pub tier_label: String,
    pub quantity: i64,
    pub is_least_than_minimum: bool,
    /// Final per-unit sell price.
    pub unit_price: Money,
    pub garment_component: Money,
    pub decoration_component: Money,
    pub labor_component: Money,
    pub freight_component: Money,
    pub ltm_fee_per_unit: Money,
    /// Whole LTM fee charged for the order (zero when not applicable).
    pub ltm_fee_total: Money,
    /// Raw subtotal before rounding.
    pub rounded_from: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
