//! # Screen Print Pricing
//!
//! Decoration is the primary location's cost for its color count, plus
//! one additional-location cost per extra location. A tier with a fee
//! spreads it exactly (no cent flooring) over the order quantity.

use super::{assemble, fee_share, garment_component, Components, PricingStrategy};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::rates::{lookup_cost, RateTables};
use crate::tier::resolve_owned;
use crate::types::{DecorationMethod, PriceBreakdown, ScreenPrintSpec};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenPrintStrategy;

impl PricingStrategy for ScreenPrintStrategy {
    type Spec = ScreenPrintSpec;

    fn method(&self) -> DecorationMethod {
        DecorationMethod::ScreenPrint
    }

    fn price(
        &self,
        garment_cost: Money,
        quantity: i64,
        spec: &ScreenPrintSpec,
        rates: &RateTables,
    ) -> CoreResult<PriceBreakdown> {
        check_color_count(spec.color_count)?;
        for &colors in &spec.additional_locations {
            check_color_count(colors)?;
        }
        let rates = rates.screen_print()?;

        let resolved = resolve_owned(quantity, &rates.tiers)?;
        let garment = garment_component(garment_cost, &resolved.tier)?;

        let mut decoration =
            lookup_cost(&rates.primary_costs, &spec.color_count.to_string(), quantity)?;
        for colors in &spec.additional_locations {
            decoration += lookup_cost(&rates.additional_costs, &colors.to_string(), quantity)?;
        }

        let is_ltm = resolved.tier.has_ltm_fee();
        let (ltm_per_unit, ltm_total) = if is_ltm {
            let fee = resolved.tier.ltm_fee;
            (fee_share(fee, quantity)?, fee)
        } else {
            (Money::zero(), Money::zero())
        };

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

fn check_color_count(colors: i64) -> CoreResult<()> {
    if colors < 1 {
        return Err(CoreError::InvalidDecorationSpec {
            reason: format!("color count must be at least 1, got {colors}"),
        });
    }
    Ok(())
}
