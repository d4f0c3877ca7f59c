//! # Embroidery Pricing
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  bucket     = largest base_stitch_count <= stitch_count                 │
//! │               (smallest bucket when below all of them)                  │
//! │  base       = cost(bucket.key, quantity)                                │
//! │  adjustment = (stitch_count - bucket.base) / 1000 × price_per_thousand  │
//! │  decoration = base + adjustment + Σ additional logos                    │
//! │                                                                         │
//! │  LTM: only on the lowest tier, fee / (actual OR reference quantity)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cap embroidery follows the same rules against its own tables; the
//! stitch helpers here are shared with [`super::cap_embroidery`].

use rust_decimal::Decimal;

use super::{assemble, fee_share, garment_component, Components, PricingStrategy};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::rates::{lookup_cost, AdditionalLogoRates, EmbroideryRates, RateTables, StitchBucket};
use crate::tier::{lowest_tier, resolve_owned};
use crate::types::{DecorationMethod, EmbroiderySpec, LtmDistribution, PriceBreakdown};

/// Prices flat (non-cap) embroidery.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbroideryStrategy;

impl PricingStrategy for EmbroideryStrategy {
    type Spec = EmbroiderySpec;

    fn method(&self) -> DecorationMethod {
        DecorationMethod::Embroidery
    }

    fn price(
        &self,
        garment_cost: Money,
        quantity: i64,
        spec: &EmbroiderySpec,
        rates: &RateTables,
    ) -> CoreResult<PriceBreakdown> {
        price_stitched(
            self.method(),
            rates.embroidery()?,
            garment_cost,
            quantity,
            spec,
        )
    }
}

// =============================================================================
// Stitch Pricing (shared with caps)
// =============================================================================

pub(crate) fn price_stitched(
    method: DecorationMethod,
    rates: &EmbroideryRates,
    garment_cost: Money,
    quantity: i64,
    spec: &EmbroiderySpec,
) -> CoreResult<PriceBreakdown> {
    if spec.stitch_count <= 0 {
        return Err(CoreError::InvalidDecorationSpec {
            reason: format!("stitch count must be positive, got {}", spec.stitch_count),
        });
    }
    let ltm_divisor = match spec.ltm_distribution {
        LtmDistribution::ActualQuantity => quantity,
        LtmDistribution::ReferenceQuantity(reference) if reference > 0 => reference,
        LtmDistribution::ReferenceQuantity(reference) => {
            return Err(CoreError::InvalidDecorationSpec {
                reason: format!("LTM reference quantity must be positive, got {reference}"),
            })
        }
    };

    let resolved = resolve_owned(quantity, &rates.tiers)?;
    let garment = garment_component(garment_cost, &resolved.tier)?;

    let bucket = select_bucket(&rates.stitch_buckets, spec.stitch_count).ok_or_else(|| {
        CoreError::MissingLocationOrSizeData {
            key: "stitch_bucket".to_string(),
            quantity,
        }
    })?;
    let base = lookup_cost(&rates.costs, &bucket.key, quantity)?;
    let adjustment = per_thousand(
        bucket.price_per_thousand,
        spec.stitch_count - bucket.base_stitch_count,
    );

    let mut decoration = base + adjustment;
    if !spec.additional_logos.is_empty() {
        let logo_rates = rates
            .additional_logo
            .as_ref()
            .ok_or_else(|| CoreError::MissingLocationOrSizeData {
                key: "additional_logo".to_string(),
                quantity,
            })?;
        for &stitches in &spec.additional_logos {
            decoration += additional_logo_price(logo_rates, stitches)?;
        }
    }

    // Only the lowest tier carries a fee; a fee on any other row is ignored.
    let is_ltm = lowest_tier(&rates.tiers)
        .map_or(false, |lowest| lowest.label == resolved.tier.label)
        && resolved.tier.has_ltm_fee();

    let (ltm_per_unit, ltm_total) = if is_ltm {
        let fee = resolved.tier.ltm_fee;
        (fee_share(fee, ltm_divisor)?, fee)
    } else {
        (Money::zero(), Money::zero())
    };

    tracing::trace!(
        %method,
        bucket = %bucket.key,
        %base,
        %adjustment,
        "stitch pricing"
    );

    assemble(
        method,
        &resolved,
        quantity,
        is_ltm,
        Components {
            garment,
            decoration,
            ltm_per_unit,
            ltm_total,
            ..Components::default()
        },
    )
}

/// Picks the bucket with the greatest base at or below `stitch_count`.
/// A design smaller than every bucket prices off the smallest one.
pub(crate) fn select_bucket(buckets: &[StitchBucket], stitch_count: i64) -> Option<&StitchBucket> {
    buckets
        .iter()
        .filter(|b| b.base_stitch_count <= stitch_count)
        .max_by_key(|b| b.base_stitch_count)
        .or_else(|| buckets.iter().min_by_key(|b| b.base_stitch_count))
}

/// `price_per_thousand × delta / 1000`, signed.
fn per_thousand(price_per_thousand: Money, stitch_delta: i64) -> Money {
    Money::from_decimal(
        price_per_thousand.amount() * Decimal::from(stitch_delta) / Decimal::ONE_THOUSAND,
    )
}

/// Price of one additional logo: flat up to the base stitch count, plus
/// overage per thousand above it.
pub(crate) fn additional_logo_price(rates: &AdditionalLogoRates, stitch_count: i64) -> CoreResult<Money> {
    if stitch_count <= 0 {
        return Err(CoreError::InvalidDecorationSpec {
            reason: format!("additional logo stitch count must be positive, got {stitch_count}"),
        });
    }
    let overage = (stitch_count - rates.base_stitch_count).max(0);
    Ok(rates.base_price + per_thousand(rates.price_per_thousand, overage))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::fixtures::all_rates;
    use rust_decimal_macros::dec;

    fn spec(stitch_count: i64, ltm_distribution: LtmDistribution) -> EmbroiderySpec {
        EmbroiderySpec {
            stitch_count,
            ltm_distribution,
            additional_logos: Vec::new(),
        }
    }

    #[test]
    fn test_base_stitch_count_no_adjustment() {
        let rates = all_rates();
        let b = EmbroideryStrategy
            .price(
                Money::from_cents(353),
                50,
                &spec(8000, LtmDistribution::ActualQuantity),
                &rates,
            )
            .unwrap();

        assert_eq!(b.tier_label, "48-71");
        assert_eq!(b.garment_component.floor_to_cent(), Money::from_cents(588));
        assert_eq!(b.decoration_component, Money::from_cents(1100));
        assert!(!b.is_least_than_minimum);
        assert!(b.ltm_fee_per_unit.is_zero());
        // 5.8833 + 11.00 = 16.8833 → 17.00
        assert_eq!(b.unit_price, Money::from_cents(1700));
    }

    #[test]
    fn test_lowest_tier_ltm_over_reference_quantity() {
        let rates = all_rates();
        let b = EmbroideryStrategy
            .price(
                Money::from_cents(353),
                5,
                &spec(8000, LtmDistribution::ReferenceQuantity(3)),
                &rates,
            )
            .unwrap();

        assert_eq!(b.tier_label, "1-7");
        assert!(b.is_least_than_minimum);
        assert_eq!(b.ltm_fee_total, Money::from_cents(5000));
        assert_eq!(b.ltm_fee_per_unit.cents(), 1667);
        // 5.8833 + 13.00 + 16.6667 = 35.55 → 36.00
        assert_eq!(b.unit_price, Money::from_cents(3600));
    }

    #[test]
    fn test_lowest_tier_ltm_over_actual_quantity() {
        let rates = all_rates();
        let b = EmbroideryStrategy
            .price(
                Money::from_cents(353),
                5,
                &spec(8000, LtmDistribution::ActualQuantity),
                &rates,
            )
            .unwrap();

        assert_eq!(b.ltm_fee_per_unit, Money::from_cents(1000));
        // 5.8833 + 13.00 + 10.00 = 28.8833 → 29.00
        assert_eq!(b.unit_price, Money::from_cents(2900));
    }

    #[test]
    fn test_reference_quantity_must_be_positive() {
        let rates = all_rates();
        let err = EmbroideryStrategy
            .price(
                Money::from_cents(353),
                5,
                &spec(8000, LtmDistribution::ReferenceQuantity(0)),
                &rates,
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidDecorationSpec { .. }));
    }

    #[test]
    fn test_linear_stitch_adjustment() {
        let rates = all_rates();
        let b = EmbroideryStrategy
            .price(
                Money::from_cents(353),
                50,
                &spec(10_500, LtmDistribution::ActualQuantity),
                &rates,
            )
            .unwrap();

        // 8000 bucket, 2500 extra stitches at $1.25/K = $3.125
        assert_eq!(b.decoration_component.amount(), dec!(14.125));
    }

    #[test]
    fn test_bucket_selection() {
        let rates = all_rates();
        let buckets = &rates.embroidery().unwrap().stitch_buckets;

        assert_eq!(select_bucket(buckets, 8000).unwrap().key, "8000");
        assert_eq!(select_bucket(buckets, 7999).unwrap().key, "5000");
        assert_eq!(select_bucket(buckets, 20_000).unwrap().key, "8000");
        // Below every bucket: smallest bucket, negative adjustment
        assert_eq!(select_bucket(buckets, 3000).unwrap().key, "5000");
        assert!(select_bucket(&[], 8000).is_none());
    }

    #[test]
    fn test_small_design_adjusts_down() {
        let rates = all_rates();
        let b = EmbroideryStrategy
            .price(
                Money::from_cents(353),
                50,
                &spec(3000, LtmDistribution::ActualQuantity),
                &rates,
            )
            .unwrap();
        // 5000 bucket at 48-71 is $8.00, minus 2 × $1.25
        assert_eq!(b.decoration_component, Money::from_cents(550));
    }

    #[test]
    fn test_additional_logos() {
        let rates = all_rates();
        let mut s = spec(8000, LtmDistribution::ActualQuantity);
        s.additional_logos = vec![4000, 7000];

        let b = EmbroideryStrategy
            .price(Money::from_cents(353), 50, &s, &rates)
            .unwrap();
        // 11.00 + 5.00 + (5.00 + 2 × 1.25)
        assert_eq!(b.decoration_component, Money::from_cents(2350));
    }

    #[test]
    fn test_additional_logos_need_rates() {
        let mut rates = all_rates();
        if let Some(emb) = rates.embroidery.as_mut() {
            emb.additional_logo = None;
        }
        let mut s = spec(8000, LtmDistribution::ActualQuantity);
        s.additional_logos = vec![5000];

        let err = EmbroideryStrategy
            .price(Money::from_cents(353), 50, &s, &rates)
            .unwrap_err();
        assert!(matches!(err, CoreError::MissingLocationOrSizeData { .. }));
    }

    #[test]
    fn test_fee_outside_lowest_tier_is_ignored() {
        let mut rates = all_rates();
        if let Some(emb) = rates.embroidery.as_mut() {
            emb.tiers[2].ltm_fee = Money::from_cents(2500);
        }
        let b = EmbroideryStrategy
            .price(
                Money::from_cents(353),
                30,
                &spec(8000, LtmDistribution::ActualQuantity),
                &rates,
            )
            .unwrap();
        assert!(!b.is_least_than_minimum);
        assert!(b.ltm_fee_per_unit.is_zero());
    }

    #[test]
    fn test_missing_tables() {
        let err = EmbroideryStrategy
            .price(
                Money::from_cents(353),
                50,
                &spec(8000, LtmDistribution::ActualQuantity),
                &RateTables::default(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::MissingTierData {
                method: DecorationMethod::Embroidery
            }
        );
    }
}
