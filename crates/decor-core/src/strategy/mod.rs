//! # Method Pricing Strategies
//!
//! One strategy per decoration method, all behind [`PricingStrategy`].
//!
//! ## Shared Shape, Separate Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve tier ──► garment = cost / margin ──► decoration cost(s)        │
//! │        │                                            │                   │
//! │        │               labor / freight (DTF only) ──┤                   │
//! │        │                                            ▼                   │
//! │        └──────────► LTM share (method rule) ──► sum ──► round_up once   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Method          | Tier                 | LTM share                        |
//! |-----------------|----------------------|----------------------------------|
//! | Embroidery, Cap | real tiers           | fee / chosen quantity, exact     |
//! | DTG             | real + synthetic 1-23| fee / quantity, floored to cents |
//! | DTF             | real tiers           | fee / quantity, floored to cents |
//! | Screen Print    | real tiers           | fee / quantity, exact            |
//!
//! The differences in the LTM column are real business rules. Each
//! strategy spells its own rule out instead of sharing a parameterized one.

pub mod cap_embroidery;
pub mod dtf;
pub mod dtg;
pub mod embroidery;
pub mod screen_print;

pub use cap_embroidery::CapEmbroideryStrategy;
pub use dtf::DtfStrategy;
pub use dtg::DtgStrategy;
pub use embroidery::EmbroideryStrategy;
pub use screen_print::ScreenPrintStrategy;

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::rates::RateTables;
use crate::rounding::round_up;
use crate::tier::ResolvedTier;
use crate::types::{DecorationMethod, PriceBreakdown, QuantityTier};

// =============================================================================
// Strategy Trait
// =============================================================================

/// A pricing rule for one decoration method.
///
/// Implementations are stateless unit structs; `price` reads only its
/// arguments, so one instance can serve any number of threads.
pub trait PricingStrategy {
    /// The decoration spec variant this strategy accepts.
    type Spec;

    fn method(&self) -> DecorationMethod;

    /// Prices one request. `garment_cost` and `quantity` have already
    /// passed boundary validation.
    fn price(
        &self,
        garment_cost: Money,
        quantity: i64,
        spec: &Self::Spec,
        rates: &RateTables,
    ) -> CoreResult<PriceBreakdown>;
}

// =============================================================================
// Shared Arithmetic
// =============================================================================

/// The additive parts of a price before rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Components {
    pub garment: Money,
    pub decoration: Money,
    pub labor: Money,
    pub freight: Money,
    pub ltm_per_unit: Money,
    pub ltm_total: Money,
}

impl Components {
    fn raw_subtotal(&self) -> CoreResult<Money> {
        [self.decoration, self.labor, self.freight, self.ltm_per_unit]
            .into_iter()
            .try_fold(self.garment, |sum, part| sum.checked_add(part))
            .ok_or_else(|| CoreError::PriceOverflow {
                stage: "raw subtotal".to_string(),
            })
    }
}

/// Garment markup: `cost / margin_denominator`.
pub(crate) fn garment_component(garment_cost: Money, tier: &QuantityTier) -> CoreResult<Money> {
    garment_cost
        .checked_div(tier.margin_denominator.value())
        .ok_or_else(|| CoreError::InvalidTierData {
            label: tier.label.clone(),
            reason: "margin division overflowed".to_string(),
        })
}

/// Exact share of a flat fee over `divisor` units.
pub(crate) fn fee_share(fee: Money, divisor: i64) -> CoreResult<Money> {
    if divisor <= 0 {
        return Err(CoreError::InvalidDecorationSpec {
            reason: format!("cannot distribute a fee over {divisor} units"),
        });
    }
    fee.checked_div(Decimal::from(divisor))
        .ok_or_else(|| CoreError::InvalidDecorationSpec {
            reason: format!("cannot distribute {fee} over {divisor} units"),
        })
}

/// Sums the components, rounds once, and builds the breakdown.
pub(crate) fn assemble(
    method: DecorationMethod,
    resolved: &ResolvedTier,
    quantity: i64,
    is_least_than_minimum: bool,
    parts: Components,
) -> CoreResult<PriceBreakdown> {
    let raw = parts.raw_subtotal()?;

    Ok(PriceBreakdown {
        method,
        tier_label: resolved.tier.label.clone(),
        quantity,
        is_least_than_minimum,
        unit_price: round_up(raw),
        garment_component: parts.garment,
        decoration_component: parts.decoration,
        labor_component: parts.labor,
        freight_component: parts.freight,
        ltm_fee_per_unit: parts.ltm_per_unit,
        ltm_fee_total: parts.ltm_total,
        rounded_from: raw,
    })
}

// =============================================================================
// Test Fixtures
// =============================================================================
