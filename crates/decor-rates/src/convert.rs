//! # Canonical Conversion
//!
//! Turns parsed upstream bundles into the core's canonical rate tables.
//!
//! ## Conversion Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TierRow[] ──► QuantityTier[] ──► check_partition ──► label → range map │
//! │                                                             │           │
//! │  cost rows keyed by TierLabel ──────────────────────────────┘           │
//! │       └──► DecorationCostEntry { key, min_qty, max_qty, unit_cost }     │
//! │                                                                         │
//! │  Any unknown label, negative cost or out-of-range margin stops the     │
//! │  load. A method is either fully loaded or not loaded at all.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use decor_core::rates::{
    AdditionalLogoRates, DtfRates, DtgRates, EmbroideryRates, ScreenPrintRates, StitchBucket,
    SyntheticTierRule,
};
use decor_core::tier::{check_partition, derive_synthetic_tier};
use decor_core::{DecorationCostEntry, FreightEntry, MarginDenominator, Money, QuantityTier};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::bundle::{
    CostType, DtfBundle, DtgBundle, EmbroideryBundle, ScreenPrintBundle, TierRow,
};
use crate::error::{RatesError, RatesResult};

/// Upstream DTF size names and their canonical keys.
const DTF_SIZE_NAMES: &[(&str, &str)] = &[
    ("Up to 5\" x 5\"", "small"),
    ("Up to 9\" x 12\"", "medium"),
    ("Up to 12\" x 16.5\"", "large"),
];

// =============================================================================
// Tiers
// =============================================================================

/// Converts and validates a tier table.
pub fn convert_tiers(rows: &[TierRow], table: &str) -> RatesResult<Vec<QuantityTier>> {
    if rows.is_empty() {
        return Err(RatesError::EmptyTable {
            table: table.to_string(),
        });
    }

    let tiers = rows
        .iter()
        .map(|row| {
            let margin = MarginDenominator::try_new(row.margin_denominator).ok_or_else(|| {
                RatesError::invalid(
                    format!("MarginDenominator of tier '{}'", row.tier_label),
                    format!("{} is outside (0, 1]", row.margin_denominator),
                )
            })?;
            let fee = row.ltm_fee.unwrap_or(Decimal::ZERO);
            Ok(QuantityTier {
                label: row.tier_label.trim().to_string(),
                min_qty: row.min_quantity,
                max_qty: row.max_quantity,
                margin_denominator: margin,
                ltm_fee: Money::from_decimal(non_negative(fee, "LTM_Fee")?),
            })
        })
        .collect::<RatesResult<Vec<_>>>()?;

    check_partition(&tiers)?;
    Ok(tiers)
}

/// Quantity range of a tier label.
fn tier_range(tiers: &[QuantityTier], label: &str) -> RatesResult<(i64, Option<i64>)> {
    let label = label.trim();
    tiers
        .iter()
        .find(|t| t.label == label)
        .map(|t| (t.min_qty, t.max_qty))
        .ok_or_else(|| RatesError::UnknownTier {
            label: label.to_string(),
        })
}

fn non_negative(value: Decimal, field: &str) -> RatesResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(RatesError::invalid(field, format!("{value} is negative")));
    }
    Ok(value)
}

fn cost_entry(
    tiers: &[QuantityTier],
    label: &str,
    key: String,
    cost: Decimal,
    field: &str,
) -> RatesResult<DecorationCostEntry> {
    let (min_qty, max_qty) = tier_range(tiers, label)?;
    Ok(DecorationCostEntry {
        key,
        min_qty,
        max_qty,
        unit_cost: Money::from_decimal(non_negative(cost, field)?),
    })
}

// =============================================================================
// Per-Method Conversion
// =============================================================================

/// Embroidery and cap embroidery share one bundle shape.
pub fn to_embroidery_rates(bundle: &EmbroideryBundle) -> RatesResult<EmbroideryRates> {
    let tiers = convert_tiers(&bundle.tiers, "embroidery tiersR")?;
    if bundle.costs.is_empty() {
        return Err(RatesError::EmptyTable {
            table: "allEmbroideryCostsR".to_string(),
        });
    }

    let mut buckets: BTreeMap<i64, StitchBucket> = BTreeMap::new();
    let mut costs = Vec::with_capacity(bundle.costs.len());

    for row in &bundle.costs {
        let key = row.stitch_count.to_string();
        let bucket = StitchBucket {
            key: key.clone(),
            base_stitch_count: row.base_stitch_count.unwrap_or(row.stitch_count),
            price_per_thousand: Money::from_decimal(non_negative(
                row.additional_stitch_rate,
                "AdditionalStitchRate",
            )?),
        };
        match buckets.get(&row.stitch_count) {
            Some(existing) if *existing != bucket => {
                return Err(RatesError::invalid(
                    format!("stitch bucket {}", row.stitch_count),
                    "rows disagree on BaseStitchCount or AdditionalStitchRate",
                ))
            }
            Some(_) => {}
            None => {
                buckets.insert(row.stitch_count, bucket);
            }
        }

        costs.push(cost_entry(
            &tiers,
            &row.tier_label,
            key,
            row.embroidery_cost,
            "EmbroideryCost",
        )?);
    }

    let additional_logo = match &bundle.additional_logo {
        Some(row) => Some(AdditionalLogoRates {
            base_price: Money::from_decimal(non_negative(row.embroidery_cost, "EmbroideryCost")?),
            base_stitch_count: row.base_stitch_count,
            price_per_thousand: Money::from_decimal(non_negative(
                row.additional_stitch_rate,
                "AdditionalStitchRate",
            )?),
        }),
        None => None,
    };

    debug!(
        tiers = tiers.len(),
        buckets = buckets.len(),
        costs = costs.len(),
        "converted embroidery bundle"
    );

    Ok(EmbroideryRates {
        tiers,
        stitch_buckets: buckets.into_values().collect(),
        costs,
        additional_logo,
    })
}

/// DTG tiers inside the small-order range are replaced by the synthetic rule.
pub fn to_dtg_rates(bundle: &DtgBundle, rule: &SyntheticTierRule) -> RatesResult<DtgRates> {
    let (shadowed, kept): (Vec<&TierRow>, Vec<&TierRow>) =
        bundle.tiers.iter().partition(|row| {
            row.min_quantity >= rule.min_qty
                && row.max_quantity.map_or(false, |max| max <= rule.max_qty)
        });

    for row in &shadowed {
        warn!(
            tier = %row.tier_label,
            synthetic = %rule.label,
            "DTG tier replaced by the synthetic small-order tier"
        );
    }

    let kept: Vec<TierRow> = kept.into_iter().cloned().collect();
    let tiers = convert_tiers(&kept, "dtg tiersR")?;

    // Fail at load time rather than on the first small order.
    derive_synthetic_tier(rule, &tiers)?;

    let shadowed_labels: Vec<&str> = shadowed.iter().map(|row| row.tier_label.trim()).collect();
    let location_costs = bundle
        .costs
        .iter()
        .filter(|row| !shadowed_labels.contains(&row.tier_label.trim()))
        .map(|row| {
            cost_entry(
                &tiers,
                &row.tier_label,
                row.print_location_code.trim().to_string(),
                row.print_cost,
                "PrintCost",
            )
        })
        .collect::<RatesResult<Vec<_>>>()?;

    if location_costs.is_empty() {
        return Err(RatesError::EmptyTable {
            table: "allDtgCostsR".to_string(),
        });
    }

    Ok(DtgRates {
        tiers,
        location_costs,
        synthetic_tier: rule.clone(),
    })
}

pub fn to_dtf_rates(bundle: &DtfBundle) -> RatesResult<DtfRates> {
    let tiers = convert_tiers(&bundle.tiers, "dtf tiersR")?;

    let first = bundle.costs.first().ok_or_else(|| RatesError::EmptyTable {
        table: "allDtfCostsR".to_string(),
    })?;
    let labor = first.pressing_labor_cost;
    if bundle.costs.iter().any(|row| row.pressing_labor_cost != labor) {
        return Err(RatesError::invalid(
            "PressingLaborCost",
            "rows disagree on the labor cost per location",
        ));
    }

    let transfer_costs = bundle
        .costs
        .iter()
        .map(|row| {
            Ok(DecorationCostEntry {
                key: dtf_size_key(&row.size),
                min_qty: row.min_quantity,
                max_qty: row.max_quantity,
                unit_cost: Money::from_decimal(non_negative(row.unit_price, "unit_price")?),
            })
        })
        .collect::<RatesResult<Vec<_>>>()?;

    if bundle.freight.is_empty() {
        return Err(RatesError::EmptyTable {
            table: "freightR".to_string(),
        });
    }
    let freight = bundle
        .freight
        .iter()
        .map(|row| {
            Ok(FreightEntry {
                min_qty: row.min_quantity,
                max_qty: row.max_quantity,
                cost_per_unit: Money::from_decimal(non_negative(
                    row.cost_per_transfer,
                    "cost_per_transfer",
                )?),
            })
        })
        .collect::<RatesResult<Vec<_>>>()?;

    Ok(DtfRates {
        tiers,
        transfer_costs,
        freight,
        labor_cost_per_location: Money::from_decimal(non_negative(labor, "PressingLaborCost")?),
    })
}

/// Maps an upstream size name to its canonical key. Names that are not
/// in the table are lowercased as-is, so `"Small"` still finds `small`.
fn dtf_size_key(size: &str) -> String {
    let size = size.trim();
    DTF_SIZE_NAMES
        .iter()
        .find(|(upstream, _)| *upstream == size)
        .map(|(_, key)| key.to_string())
        .unwrap_or_else(|| size.to_lowercase())
}

pub fn to_screen_print_rates(bundle: &ScreenPrintBundle) -> RatesResult<ScreenPrintRates> {
    let tiers = convert_tiers(&bundle.tiers, "screen print tiersR")?;

    let mut primary_costs = Vec::new();
    let mut additional_costs = Vec::new();
    for row in &bundle.costs {
        if row.color_count < 1 {
            return Err(RatesError::invalid(
                "ColorCount",
                format!("{} is not a color count", row.color_count),
            ));
        }
        let entry = cost_entry(
            &tiers,
            &row.tier_label,
            row.color_count.to_string(),
            row.base_print_cost,
            "BasePrintCost",
        )?;
        match row.cost_type {
            CostType::PrimaryLocation => primary_costs.push(entry),
            CostType::AdditionalLocation => additional_costs.push(entry),
        }
    }

    if primary_costs.is_empty() {
        return Err(RatesError::EmptyTable {
            table: "allScreenprintCostsR (PrimaryLocation)".to_string(),
        });
    }

    Ok(ScreenPrintRates {
        tiers,
        primary_costs,
        additional_costs,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
