//! # DTG Pricing
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  location codes: ["LC", "FF_FB"]  ──split '_'──►  LC, FF, FB            │
//! │  decoration = Σ cost(code, lookup_quantity)                             │
//! │                                                                         │
//! │  quantity 1-23 ──► synthetic tier                                       │
//! │                     margin + costs from 24-47 (looked up at 24)         │
//! │                     ltm per unit = floor_cent($50 / quantity)           │
//! │                     is_least_than_minimum = ltm per unit > 0            │
//! │                                                                         │
//! │  quantity 24+  ──► real tier, no LTM                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use super::{assemble, fee_share, garment_component, Components, PricingStrategy};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::rates::{lookup_cost, RateTables};
use crate::rounding::floor_to_cent;
use crate::tier::resolve_with_synthetic;
use crate::types::{DecorationMethod, DtgSpec, PriceBreakdown};

#[derive(Debug, Clone, Copy, Default)]
pub struct DtgStrategy;

impl PricingStrategy for DtgStrategy {
    type Spec = DtgSpec;

    fn method(&self) -> DecorationMethod {
        DecorationMethod::Dtg
    }

    fn price(
        &self,
        garment_cost: Money,
        quantity: i64,
        spec: &DtgSpec,
        rates: &RateTables,
    ) -> CoreResult<PriceBreakdown> {
        let codes = expand_location_codes(&spec.location_codes)?;
        let rates = rates.dtg()?;

        let resolved = resolve_with_synthetic(quantity, &rates.tiers, &rates.synthetic_tier)?;
        let garment = garment_component(garment_cost, &resolved.tier)?;

        let decoration = codes
            .iter()
            .map(|code| lookup_cost(&rates.location_costs, code, resolved.lookup_quantity))
            .sum::<CoreResult<Money>>()?;

        let ltm_per_unit = if resolved.synthetic {
            floor_to_cent(fee_share(resolved.tier.ltm_fee, quantity)?)
        } else {
            Money::zero()
        };
        // A zero synthetic fee prices the small order without LTM.
        let is_ltm = ltm_per_unit.is_positive();
        let ltm_total = if is_ltm {
            resolved.tier.ltm_fee
        } else {
            Money::zero()
        };

        if resolved.synthetic {
            tracing::debug!(
                quantity,
                borrowed_at = resolved.lookup_quantity,
                "DTG small order priced on synthetic tier"
            );
        }

        assemble(
            self.method(),
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
}

/// Splits combined placements (`LC_FB`) into single location codes.
fn expand_location_codes(codes: &[String]) -> CoreResult<Vec<&str>> {
    if codes.is_empty() {
        return Err(CoreError::InvalidDecorationSpec {
            reason: "DTG requires at least one print location".to_string(),
        });
    }

    let mut expanded = Vec::with_capacity(codes.len());
    for code in codes {
        for part in code.split('_') {
            let part = part.trim();
            if part.is_empty() {
                return Err(CoreError::InvalidDecorationSpec {
                    reason: format!("malformed location code '{code}'"),
                });
            }
            expanded.push(part);
        }
    }
    Ok(expanded)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::fixtures::all_rates;

    fn spec(codes: &[&str]) -> DtgSpec {
        DtgSpec {
            location_codes: codes.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_synthetic_tier_small_order() {
        let rates = all_rates();
        let b = DtgStrategy
            .price(Money::from_cents(600), 10, &spec(&["LC"]), &rates)
            .unwrap();

        assert_eq!(b.tier_label, "1-23");
        assert!(b.is_least_than_minimum);
        assert_eq!(b.ltm_fee_total, Money::from_cents(5000));
        assert_eq!(b.ltm_fee_per_unit, Money::from_cents(500));
        // 24-47 cost for LC is $6.00; 10.00 + 6.00 + 5.00
        assert_eq!(b.decoration_component, Money::from_cents(600));
        assert_eq!(b.unit_price, Money::from_cents(2100));
    }

    #[test]
    fn test_synthetic_ltm_is_floored() {
        let rates = all_rates();
        let b = DtgStrategy
            .price(Money::from_cents(600), 7, &spec(&["LC"]), &rates)
            .unwrap();
        // 50 / 7 = 7.142857... → 7.14
        assert_eq!(b.ltm_fee_per_unit, Money::from_cents(714));
        assert_eq!(b.rounded_from, Money::from_cents(2314));
        assert_eq!(b.unit_price, Money::from_cents(2350));
    }

    #[test]
    fn test_synthetic_tier_without_chargeable_fee_is_not_flagged() {
        for fee_cents in [0, 5] {
            let mut rates = all_rates();
            if let Some(dtg) = rates.dtg.as_mut() {
                dtg.synthetic_tier.ltm_fee = Money::from_cents(fee_cents);
            }
            let b = DtgStrategy
                .price(Money::from_cents(600), 10, &spec(&["LC"]), &rates)
                .unwrap();

            assert_eq!(b.tier_label, "1-23");
            assert!(b.ltm_fee_per_unit.is_zero());
            assert!(!b.is_least_than_minimum);
            assert!(b.ltm_fee_total.is_zero());
            // 10.00 + 6.00, borrowed costs still apply
            assert_eq!(b.unit_price, Money::from_cents(1600));
        }
    }

    #[test]
    fn test_regular_tier_has_no_ltm() {
        let rates = all_rates();
        let b = DtgStrategy
            .price(Money::from_cents(600), 24, &spec(&["LC"]), &rates)
            .unwrap();
        assert_eq!(b.tier_label, "24-47");
        assert!(!b.is_least_than_minimum);
        assert!(b.ltm_fee_per_unit.is_zero());
        assert!(b.ltm_fee_total.is_zero());
        assert_eq!(b.unit_price, Money::from_cents(1600));
    }

    #[test]
    fn test_locations_add() {
        let rates = all_rates();
        let one = DtgStrategy
            .price(Money::from_cents(600), 50, &spec(&["LC"]), &rates)
            .unwrap();
        let two = DtgStrategy
            .price(Money::from_cents(600), 50, &spec(&["LC", "FB"]), &rates)
            .unwrap();

        assert_eq!(one.decoration_component, Money::from_cents(550));
        assert_eq!(two.decoration_component, Money::from_cents(1400));
    }

    #[test]
    fn test_combined_location_code_splits() {
        let rates = all_rates();
        let combined = DtgStrategy
            .price(Money::from_cents(600), 80, &spec(&["LC_FB"]), &rates)
            .unwrap();
        let separate = DtgStrategy
            .price(Money::from_cents(600), 80, &spec(&["LC", "FB"]), &rates)
            .unwrap();
        assert_eq!(combined.decoration_component, separate.decoration_component);
        assert_eq!(combined.decoration_component, Money::from_cents(1300));
    }

    #[test]
    fn test_unknown_location_fails() {
        let rates = all_rates();
        let err = DtgStrategy
            .price(Money::from_cents(600), 50, &spec(&["XX"]), &rates)
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::MissingLocationOrSizeData {
                key: "XX".to_string(),
                quantity: 50
            }
        );
    }

    #[test]
    fn test_bad_location_lists() {
        let rates = all_rates();
        for codes in [&[][..], &["LC_"][..], &["_"][..]] {
            let err = DtgStrategy
                .price(Money::from_cents(600), 50, &spec(codes), &rates)
                .unwrap_err();
            assert!(matches!(err, CoreError::InvalidDecorationSpec { .. }));
        }
    }
}
