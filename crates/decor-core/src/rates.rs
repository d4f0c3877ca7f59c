//! # Rate Tables
//!
//! Caller-supplied, immutable rate data in canonical shape.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  upstream fetch ──► decor-rates (schema + validation) ──► RateTables    │
//! │                                                           │             │
//! │                     &RateTables into every compute_price ◄┘             │
//! │                                                                         │
//! │  The core never fetches, caches or mutates these. A caller that        │
//! │  live-reloads rates swaps in a whole new RateTables value.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DecorationCostEntry, DecorationMethod, FreightEntry, QuantityTier};

// =============================================================================
// Rate Tables
// =============================================================================

/// All rate data for one pricing session. A method with no tables fails
/// with `MissingTierData` rather than borrowing another method's rates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTables {
    pub embroidery: Option<EmbroideryRates>,
    pub cap_embroidery: Option<EmbroideryRates>,
    pub dtg: Option<DtgRates>,
    pub dtf: Option<DtfRates>,
    pub screen_print: Option<ScreenPrintRates>,
}

impl RateTables {
    pub fn embroidery(&self) -> CoreResult<&EmbroideryRates> {
        self.embroidery.as_ref().ok_or(CoreError::MissingTierData {
            method: DecorationMethod::Embroidery,
        })
    }

    pub fn cap_embroidery(&self) -> CoreResult<&EmbroideryRates> {
        self.cap_embroidery.as_ref().ok_or(CoreError::MissingTierData {
            method: DecorationMethod::CapEmbroidery,
        })
    }

    pub fn dtg(&self) -> CoreResult<&DtgRates> {
        self.dtg.as_ref().ok_or(CoreError::MissingTierData {
            method: DecorationMethod::Dtg,
        })
    }

    pub fn dtf(&self) -> CoreResult<&DtfRates> {
        self.dtf.as_ref().ok_or(CoreError::MissingTierData {
            method: DecorationMethod::Dtf,
        })
    }

    pub fn screen_print(&self) -> CoreResult<&ScreenPrintRates> {
        self.screen_print.as_ref().ok_or(CoreError::MissingTierData {
            method: DecorationMethod::ScreenPrint,
        })
    }
}

// =============================================================================
// Embroidery
// =============================================================================

/// A stitch-count bucket: base prices in `costs` are quoted at
/// `base_stitch_count`, and each thousand stitches away from it moves the
/// price by `price_per_thousand`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StitchBucket {
    /// Matches `DecorationCostEntry::key` of this bucket's cost rows.
    pub key: String,
    pub base_stitch_count: i64,
    pub price_per_thousand: Money,
}

/// Flat-plus-overage pricing for additional logos (back logo, sleeve).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalLogoRates {
    pub base_price: Money,
    pub base_stitch_count: i64,
    pub price_per_thousand: Money,
}

/// Rates for embroidery or cap embroidery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbroideryRates {
    pub tiers: Vec<QuantityTier>,
    pub stitch_buckets: Vec<StitchBucket>,
    pub costs: Vec<DecorationCostEntry>,
    pub additional_logo: Option<AdditionalLogoRates>,
}

// =============================================================================
// DTG
// =============================================================================

/// The DTG small-order tier.
///
/// ## Business Rule
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Quantities 1-23 have NO cost data of their own.                        │
/// │                                                                         │
/// │   1-23  ──borrows──►  24-47 margin + 24-47 print costs                  │
/// │     │                                                                   │
/// │     └── forced least-than-minimum, fixed fee (e.g. $50)                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticTierRule {
    pub label: String,
    pub min_qty: i64,
    pub max_qty: i64,
    /// Label of the tier whose margin and costs are reused.
    pub borrow_from: String,
    pub ltm_fee: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtgRates {
    pub tiers: Vec<QuantityTier>,
    /// Print cost rows keyed by single location code (`LC`, `FB`, ...).
    pub location_costs: Vec<DecorationCostEntry>,
    pub synthetic_tier: SyntheticTierRule,
}

// =============================================================================
// DTF
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtfRates {
    pub tiers: Vec<QuantityTier>,
    /// Transfer cost rows keyed by size (`small`, `medium`, `large`).
    pub transfer_costs: Vec<DecorationCostEntry>,
    pub freight: Vec<FreightEntry>,
    pub labor_cost_per_location: Money,
}

// =============================================================================
// Screen Print
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenPrintRates {
    pub tiers: Vec<QuantityTier>,
    /// Primary location rows keyed by color count (`"1"`, `"2"`, ...).
    pub primary_costs: Vec<DecorationCostEntry>,
    /// Additional location rows keyed by color count.
    #[serde(default)]
    pub additional_costs: Vec<DecorationCostEntry>,
}

// =============================================================================
// Lookups
// =============================================================================

/// Finds the single cost row for `key` containing `quantity`.
///
/// Zero matches and multiple matches both fail; there is no fallback row.
pub fn lookup_cost(entries: &[DecorationCostEntry], key: &str, quantity: i64) -> CoreResult<Money> {
    let mut matches = entries
        .iter()
        .filter(|entry| entry.key == key && entry.contains(quantity));

    let first = matches
        .next()
        .ok_or_else(|| CoreError::MissingLocationOrSizeData {
            key: key.to_string(),
            quantity,
        })?;

    if matches.next().is_some() {
        return Err(CoreError::AmbiguousCostData {
            key: key.to_string(),
            quantity,
        });
    }

    Ok(first.unit_cost)
}

/// Finds the freight cost per unit for `quantity`.
pub fn lookup_freight(entries: &[FreightEntry], quantity: i64) -> CoreResult<Money> {
    let mut matches = entries.iter().filter(|entry| entry.contains(quantity));

    let first = matches
        .next()
        .ok_or(CoreError::MissingFreightData { quantity })?;

    if matches.next().is_some() {
        return Err(CoreError::AmbiguousCostData {
            key: "freight".to_string(),
            quantity,
        });
    }

    Ok(first.cost_per_unit)
}

// =============================================================================
// Unit Tests
// =============================================================================
