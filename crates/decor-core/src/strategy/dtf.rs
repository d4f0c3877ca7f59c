//! # DTF Pricing
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  n = number of transfer locations                                       │
//! │                                                                         │
//! │  unit = round_up( garment / margin                                      │
//! │                 + Σ transfer_cost(size_i, quantity)                     │
//! │                 + labor_per_location × n                                │
//! │                 + freight_per_transfer(quantity) × n                    │
//! │                 + floor_cent(ltm_fee / quantity) )                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transfer costs and freight both key off the order quantity, so the
//! same location count always adds the same labor and freight.

use super::{assemble, fee_share, garment_component, Components, PricingStrategy};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::rates::{lookup_cost, lookup_freight, RateTables};
use crate::rounding::floor_to_cent;
use crate::tier::resolve_owned;
use crate::types::{DecorationMethod, DtfSpec, PriceBreakdown};

#[derive(Debug, Clone, Copy, Default)]
pub struct DtfStrategy;

impl PricingStrategy for DtfStrategy {
    type Spec = DtfSpec;

    fn method(&self) -> DecorationMethod {
        DecorationMethod::Dtf
    }

    fn price(
        &self,
        garment_cost: Money,
        quantity: i64,
        spec: &DtfSpec,
        rates: &RateTables,
    ) -> CoreResult<PriceBreakdown> {
        if spec.transfer_size_keys.is_empty() {
            return Err(CoreError::InvalidDecorationSpec {
                reason: "DTF requires at least one transfer location".to_string(),
            });
        }
        let rates = rates.dtf()?;
        let locations = spec.transfer_size_keys.len() as i64;

        let resolved = resolve_owned(quantity, &rates.tiers)?;
        let garment = garment_component(garment_cost, &resolved.tier)?;

        let decoration = spec
            .transfer_size_keys
            .iter()
            .map(|size| lookup_cost(&rates.transfer_costs, size, quantity))
            .sum::<CoreResult<Money>>()?;
        let labor = per_location(rates.labor_cost_per_location, locations, "DTF labor")?;
        let freight = per_location(
            lookup_freight(&rates.freight, quantity)?,
            locations,
            "DTF freight",
        )?;

        // A fee that floors to $0.00 per unit is neither charged nor flagged.
        let ltm_per_unit = if resolved.tier.has_ltm_fee() {
            floor_to_cent(fee_share(resolved.tier.ltm_fee, quantity)?)
        } else {
            Money::zero()
        };
        let is_ltm = ltm_per_unit.is_positive();
        let ltm_total = if is_ltm {
            resolved.tier.ltm_fee
        } else {
            Money::zero()
        };

        assemble(
            self.method(),
            &resolved,
            quantity,
            is_ltm,
            Components {
                garment,
                decoration,
                labor,
                freight,
                ltm_per_unit,
                ltm_total,
            },
        )
    }
}

fn per_location(cost: Money, locations: i64, stage: &str) -> CoreResult<Money> {
    cost.checked_mul_quantity(locations)
        .ok_or_else(|| CoreError::PriceOverflow {
            stage: stage.to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::fixtures::all_rates;
    use rust_decimal_macros::dec;

    fn spec(sizes: &[&str]) -> DtfSpec {
        DtfSpec {
            transfer_size_keys: sizes.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_two_locations_medium_and_large() {
        let rates = all_rates();
        let b = DtfStrategy
            .price(Money::from_cents(500), 30, &spec(&["medium", "large"]), &rates)
            .unwrap();

        assert_eq!(b.tier_label, "24-47");
        assert_eq!(b.decoration_component, Money::from_cents(2050));
        assert_eq!(b.labor_component, Money::from_cents(400));
        assert_eq!(b.freight_component, Money::from_cents(100));
        assert!(!b.is_least_than_minimum);
        // 5.00 / 0.57 = 8.7719...; + 20.50 + 4.00 + 1.00 = 34.27 → 34.50
        assert_eq!(b.garment_component.amount().round_dp(4), dec!(8.7719));
        assert_eq!(b.unit_price, Money::from_cents(3450));
    }

    #[test]
    fn test_small_order_ltm_floored() {
        let rates = all_rates();
        let b = DtfStrategy
            .price(Money::from_cents(500), 18, &spec(&["small"]), &rates)
            .unwrap();

        assert_eq!(b.tier_label, "10-23");
        assert!(b.is_least_than_minimum);
        // 50 / 18 = 2.777... → 2.77
        assert_eq!(b.ltm_fee_per_unit, Money::from_cents(277));
        assert_eq!(b.ltm_fee_total, Money::from_cents(5000));
    }

    #[test]
    fn test_fee_that_floors_to_zero_is_not_flagged() {
        let mut rates = all_rates();
        if let Some(dtf) = rates.dtf.as_mut() {
            for tier in dtf.tiers.iter_mut().filter(|t| t.label == "10-23") {
                tier.ltm_fee = Money::from_cents(5);
            }
        }
        // $0.05 / 10 = $0.005 → $0.00
        let b = DtfStrategy
            .price(Money::from_cents(500), 10, &spec(&["small"]), &rates)
            .unwrap();

        assert_eq!(b.tier_label, "10-23");
        assert!(b.ltm_fee_per_unit.is_zero());
        assert!(!b.is_least_than_minimum);
        assert!(b.ltm_fee_total.is_zero());
        assert_eq!(b.ltm_fee_per_unit.is_positive(), b.is_least_than_minimum);
    }

    #[test]
    fn test_location_count_drives_labor_and_freight() {
        let rates = all_rates();
        let one = DtfStrategy
            .price(Money::from_cents(500), 60, &spec(&["small"]), &rates)
            .unwrap();
        let three = DtfStrategy
            .price(Money::from_cents(500), 60, &spec(&["small", "small", "small"]), &rates)
            .unwrap();

        assert_eq!(three.labor_component, one.labor_component * 3);
        assert_eq!(three.freight_component, one.freight_component * 3);
        assert_eq!(three.decoration_component, one.decoration_component * 3);
    }

    #[test]
    fn test_below_lowest_tier_fails() {
        let rates = all_rates();
        let err = DtfStrategy
            .price(Money::from_cents(500), 5, &spec(&["small"]), &rates)
            .unwrap_err();
        assert_eq!(err, CoreError::NoTierForQuantity { quantity: 5 });
    }

    #[test]
    fn test_missing_freight_row() {
        let mut rates = all_rates();
        if let Some(dtf) = rates.dtf.as_mut() {
            dtf.freight.retain(|row| row.min_qty != 50);
        }
        let err = DtfStrategy
            .price(Money::from_cents(500), 60, &spec(&["small"]), &rates)
            .unwrap_err();
        assert_eq!(err, CoreError::MissingFreightData { quantity: 60 });
    }

    #[test]
    fn test_empty_locations_rejected() {
        let rates = all_rates();
        assert!(matches!(
            DtfStrategy.price(Money::from_cents(500), 30, &spec(&[]), &rates),
            Err(CoreError::InvalidDecorationSpec { .. })
        ));
    }
}
