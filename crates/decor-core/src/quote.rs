//! # Multi-Product Quotes
//!
//! Prices several garment styles that share one decoration, the way an
//! order desk quotes a mixed order.
//!
//! ## Aggregation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Line A: PC54   S:10 M:10 L:4  2XL:6                                    │
//! │  Line B: PC61   M:12 L:6                                                │
//! │                                                                         │
//! │  aggregate quantity = 48  ──► ONE tier for every line and size          │
//! │                                                                         │
//! │  per line, sizes grouped by upcharge:                                   │
//! │     S/M/L   (+$0.00) ──► compute_price(base + 0.00, 48)                 │
//! │     2XL     (+$2.00) ──► compute_price(base + 2.00, 48)                 │
//! │                                                                         │
//! │  group total = unit_price × group quantity                              │
//! │  LTM fee is reported once for the whole order                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::engine::compute_price;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::rates::RateTables;
use crate::types::{DecorationSpec, PricingRequest};
use crate::validation::validate_not_empty;

// =============================================================================
// Quote Types
// =============================================================================

/// One garment style on a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub style: String,
    /// Blank cost of the standard sizes.
    pub base_cost: Money,
    /// Quantity per size label. Sizes with zero quantity are skipped.
    pub size_quantities: BTreeMap<String, i64>,
    /// Extra blank cost per size (e.g. `2XL` → $2.00). Missing sizes add nothing.
    #[serde(default)]
    pub size_upcharges: BTreeMap<String, Money>,
}

/// Sizes sharing one upcharge, priced together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SizeGroupPrice {
    pub sizes: Vec<String>,
    pub upcharge: Money,
    pub quantity: i64,
    pub unit_price: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLinePrice {
    pub style: String,
    pub groups: Vec<SizeGroupPrice>,
    pub subtotal: Money,
}

/// The priced quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub aggregate_quantity: i64,
    pub tier_label: String,
    pub is_least_than_minimum: bool,
    /// The whole order's LTM fee (already spread into the unit prices).
    pub ltm_fee_total: Money,
    pub lines: Vec<QuoteLinePrice>,
    pub subtotal: Money,
}

// =============================================================================
// Pricing
// =============================================================================

/// Prices every line of a quote against one shared decoration.
///
/// ## Errors
/// - `InvalidInput` for an empty quote, negative size quantities, or a
///   quote whose sizes add up to zero pieces
/// - Anything `compute_price` returns for an individual size group
pub fn price_quote(
    lines: &[QuoteLine],
    decoration: &DecorationSpec,
    rates: &RateTables,
) -> CoreResult<QuoteSummary> {
    validate_not_empty(lines, "lines")?;

    let mut aggregate: i64 = 0;
    for line in lines {
        for &qty in line.size_quantities.values() {
            if qty < 0 {
                return Err(ValidationError::OutOfRange {
                    field: format!("{} size quantity", line.style),
                    min: 0,
                    max: i64::MAX,
                }
                .into());
            }
            aggregate = aggregate.saturating_add(qty);
        }
    }
    if aggregate == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into());
    }

    tracing::debug!(lines = lines.len(), aggregate, "pricing quote");

    let mut summary = QuoteSummary {
        aggregate_quantity: aggregate,
        tier_label: String::new(),
        is_least_than_minimum: false,
        ltm_fee_total: Money::zero(),
        lines: Vec::with_capacity(lines.len()),
        subtotal: Money::zero(),
    };

    for line in lines {
        let mut groups: BTreeMap<Money, Vec<(&String, i64)>> = BTreeMap::new();
        for (size, &qty) in &line.size_quantities {
            if qty == 0 {
                continue;
            }
            let upcharge = line.size_upcharges.get(size).copied().unwrap_or_default();
            groups.entry(upcharge).or_default().push((size, qty));
        }

        let mut priced = QuoteLinePrice {
            style: line.style.clone(),
            groups: Vec::with_capacity(groups.len()),
            subtotal: Money::zero(),
        };

        for (upcharge, sizes) in groups {
            let breakdown = compute_price(
                &PricingRequest {
                    garment_cost: line
                        .base_cost
                        .checked_add(upcharge)
                        .ok_or_else(|| overflow("garment cost with upcharge"))?,
                    quantity: aggregate,
                    decoration: decoration.clone(),
                },
                rates,
            )?;

            // Tier and LTM depend only on the aggregate, so every group agrees.
            summary.tier_label = breakdown.tier_label.clone();
            summary.is_least_than_minimum = breakdown.is_least_than_minimum;
            summary.ltm_fee_total = breakdown.ltm_fee_total;

            let quantity: i64 = sizes.iter().map(|(_, qty)| qty).sum();
            let total = breakdown
                .unit_price
                .checked_mul_quantity(quantity)
                .ok_or_else(|| overflow("size group total"))?;
            priced.subtotal = priced
                .subtotal
                .checked_add(total)
                .ok_or_else(|| overflow("line subtotal"))?;
            priced.groups.push(SizeGroupPrice {
                sizes: sizes.into_iter().map(|(size, _)| size.clone()).collect(),
                upcharge,
                quantity,
                unit_price: breakdown.unit_price,
                total,
            });
        }

        summary.subtotal = summary
            .subtotal
            .checked_add(priced.subtotal)
            .ok_or_else(|| overflow("quote subtotal"))?;
        summary.lines.push(priced);
    }

    Ok(summary)
}

fn overflow(stage: &str) -> CoreError {
    CoreError::PriceOverflow {
        stage: stage.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
