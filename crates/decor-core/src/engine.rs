//! # Price Engine
//!
//! The single entry point: validate the request, dispatch on the decoration
//! spec, return a breakdown or a typed error.
//!
//! ## Call Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  compute_price(request, &RateTables)                                    │
//! │       │                                                                 │
//! │       ├── cost or quantity <= 0 or above its limit ──► InvalidInput     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  match request.decoration                                               │
//! │       ├── Embroidery    ──► EmbroideryStrategy                          │
//! │       ├── CapEmbroidery ──► CapEmbroideryStrategy                       │
//! │       ├── Dtg           ──► DtgStrategy                                 │
//! │       ├── Dtf           ──► DtfStrategy                                 │
//! │       └── ScreenPrint   ──► ScreenPrintStrategy                         │
//! │                                                                         │
//! │  No cache, no I/O, no shared state: any number of threads may call    │
//! │  this against the same &RateTables.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::CoreResult;
use crate::rates::RateTables;
use crate::strategy::{
    CapEmbroideryStrategy, DtfStrategy, DtgStrategy, EmbroideryStrategy, PricingStrategy,
    ScreenPrintStrategy,
};
use crate::types::{DecorationSpec, PriceBreakdown, PricingRequest};
use crate::validation::{validate_garment_cost, validate_quantity};

/// Stateless pricing facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceEngine;

impl PriceEngine {
    /// Prices one request against `rates`.
    ///
    /// ## Example
    /// ```rust
    /// use decor_core::{compute_price, DecorationSpec, DtfSpec, Money, PricingRequest, RateTables};
    ///
    /// let request = PricingRequest {
    ///     garment_cost: Money::from_cents(500),
    ///     quantity: 30,
    ///     decoration: DecorationSpec::Dtf(DtfSpec {
    ///         transfer_size_keys: vec!["small".to_string()],
    ///     }),
    /// };
    ///
    /// // No DTF tables loaded: fails closed instead of guessing a price.
    /// assert!(compute_price(&request, &RateTables::default()).is_err());
    /// ```
    pub fn compute_price(
        &self,
        request: &PricingRequest,
        rates: &RateTables,
    ) -> CoreResult<PriceBreakdown> {
        validate_garment_cost(request.garment_cost)?;
        validate_quantity(request.quantity)?;

        let method = request.decoration.method();
        tracing::debug!(%method, quantity = request.quantity, "computing price");

        let cost = request.garment_cost;
        let qty = request.quantity;
        let result = match &request.decoration {
            DecorationSpec::Embroidery(spec) => EmbroideryStrategy.price(cost, qty, spec, rates),
            DecorationSpec::CapEmbroidery(spec) => {
                CapEmbroideryStrategy.price(cost, qty, spec, rates)
            }
            DecorationSpec::Dtg(spec) => DtgStrategy.price(cost, qty, spec, rates),
            DecorationSpec::Dtf(spec) => DtfStrategy.price(cost, qty, spec, rates),
            DecorationSpec::ScreenPrint(spec) => ScreenPrintStrategy.price(cost, qty, spec, rates),
        };

        match &result {
            Ok(breakdown) => tracing::trace!(
                %method,
                tier = %breakdown.tier_label,
                raw = %breakdown.rounded_from,
                unit = %breakdown.unit_price,
                ltm = breakdown.is_least_than_minimum,
                "priced"
            ),
            Err(err) => tracing::debug!(%method, error = %err, "pricing failed"),
        }

        result
    }
}

/// Prices one request with a default [`PriceEngine`].
pub fn compute_price(request: &PricingRequest, rates: &RateTables) -> CoreResult<PriceBreakdown> {
    PriceEngine.compute_price(request, rates)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use crate::money::Money;
    use crate::rounding::round_up;
    use crate::strategy::fixtures::{all_rates, tier};
    use crate::tier::resolve;
    use crate::types::*;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn request(cents: i64, quantity: i64, decoration: DecorationSpec) -> PricingRequest {
        PricingRequest {
            garment_cost: Money::from_cents(cents),
            quantity,
            decoration,
        }
    }

    fn embroidery(stitch_count: i64, ltm: LtmDistribution) -> DecorationSpec {
        DecorationSpec::Embroidery(EmbroiderySpec {
            stitch_count,
            ltm_distribution: ltm,
            additional_logos: Vec::new(),
        })
    }

    fn cap(stitch_count: i64) -> DecorationSpec {
        DecorationSpec::CapEmbroidery(EmbroiderySpec {
            stitch_count,
            ltm_distribution: LtmDistribution::ActualQuantity,
            additional_logos: Vec::new(),
        })
    }

    fn dtf(sizes: &[&str]) -> DecorationSpec {
        DecorationSpec::Dtf(DtfSpec {
            transfer_size_keys: sizes.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn dtg(codes: &[&str]) -> DecorationSpec {
        DecorationSpec::Dtg(DtgSpec {
            location_codes: codes.iter().map(|c| c.to_string()).collect(),
        })
    }

    fn screen(colors: i64) -> DecorationSpec {
        DecorationSpec::ScreenPrint(ScreenPrintSpec {
            color_count: colors,
            additional_locations: Vec::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Worked examples
    // -------------------------------------------------------------------------

    #[test]
    fn test_embroidery_base_stitches_quantity_50() {
        let b = compute_price(
            &request(353, 50, embroidery(8000, LtmDistribution::ActualQuantity)),
            &all_rates(),
        )
        .unwrap();

        assert_eq!(b.method, DecorationMethod::Embroidery);
        assert_eq!(b.tier_label, "48-71");
        assert_eq!(b.garment_component.cents(), 588);
        assert!(!b.is_least_than_minimum);
        assert!(b.ltm_fee_total.is_zero());
        assert_eq!(b.unit_price, round_up(b.rounded_from));
        assert_eq!(b.unit_price, Money::from_cents(1700));
    }

    #[test]
    fn test_embroidery_quantity_5_reference_ltm() {
        let b = compute_price(
            &request(353, 5, embroidery(8000, LtmDistribution::ReferenceQuantity(3))),
            &all_rates(),
        )
        .unwrap();

        assert_eq!(b.tier_label, "1-7");
        assert!(b.is_least_than_minimum);
        assert_eq!(b.ltm_fee_per_unit.cents(), 1667);
        assert_eq!(
            b.rounded_from,
            b.garment_component + b.decoration_component + b.ltm_fee_per_unit
        );
    }

    #[test]
    fn test_dtf_two_locations_quantity_30() {
        let rates = all_rates();
        let b = compute_price(&request(500, 30, dtf(&["medium", "large"])), &rates).unwrap();

        assert_eq!(b.decoration_component, Money::from_cents(800 + 1250));
        assert_eq!(b.labor_component, Money::from_cents(200) * 2);
        assert_eq!(b.freight_component, Money::from_cents(50) * 2);
        assert_eq!(b.unit_price, Money::from_cents(3450));
    }

    #[test]
    fn test_dtg_quantity_10_synthetic_tier() {
        let b = compute_price(&request(600, 10, dtg(&["LC"])), &all_rates()).unwrap();

        assert_eq!(b.tier_label, "1-23");
        assert!(b.is_least_than_minimum);
        assert_eq!(b.ltm_fee_per_unit, Money::from_cents(500));
        assert_eq!(b.decoration_component, Money::from_cents(600));
    }

    #[test]
    fn test_overlapping_tiers_are_ambiguous() {
        let tiers = vec![
            tier("24-47", 24, Some(47), dec!(0.6), 0),
            tier("24-71", 24, Some(71), dec!(0.6), 0),
        ];
        assert!(matches!(
            resolve(30, &tiers),
            Err(CoreError::AmbiguousTier { quantity: 30, .. })
        ));

        let mut rates = all_rates();
        if let Some(dtf) = rates.dtf.as_mut() {
            dtf.tiers.push(tier("25-35", 25, Some(35), dec!(0.6), 0));
        }
        assert!(matches!(
            compute_price(&request(500, 30, dtf(&["small"])), &rates),
            Err(CoreError::AmbiguousTier { .. })
        ));
    }

    // -------------------------------------------------------------------------
    // Boundary validation
    // -------------------------------------------------------------------------

    #[test]
    fn test_rejects_non_positive_inputs() {
        let rates = all_rates();

        let err = compute_price(&request(0, 30, dtf(&["small"])), &rates).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidInput(ValidationError::MustBePositive {
                field: "garment_cost".to_string()
            })
        );

        let err = compute_price(&request(500, 0, dtf(&["small"])), &rates).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));

        let err = compute_price(&request(500, -4, dtg(&["LC"])), &rates).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_huge_garment_cost_is_rejected_not_panicking() {
        let rates = all_rates();
        let huge = PricingRequest {
            garment_cost: Money::from_decimal(rust_decimal::Decimal::MAX / rust_decimal::Decimal::TWO),
            quantity: 50,
            decoration: dtf(&["small"]),
        };

        let err = compute_price(&huge, &rates).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidInput(ValidationError::OutOfRange { .. })
        ));

        let largest = PricingRequest {
            garment_cost: Money::from_cents(crate::MAX_GARMENT_COST_CENTS),
            ..huge
        };
        assert!(compute_price(&largest, &rates).is_ok());
    }

    #[test]
    fn test_dispatches_to_matching_method() {
        let rates = all_rates();
        let specs = [
            embroidery(8000, LtmDistribution::ActualQuantity),
            cap(8000),
            dtg(&["LC"]),
            dtf(&["small"]),
            screen(1),
        ];
        for spec in specs {
            let expected = spec.method();
            let b = compute_price(&request(500, 48, spec), &rates).unwrap();
            assert_eq!(b.method, expected);
        }
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    #[test]
    fn test_unit_price_never_increases_with_quantity() {
        let rates = all_rates();
        let cases: Vec<(DecorationSpec, i64)> = vec![
            (embroidery(8000, LtmDistribution::ActualQuantity), 1),
            (embroidery(10_000, LtmDistribution::ActualQuantity), 1),
            (cap(9000), 1),
            (dtg(&["LC", "FB"]), 1),
            (dtf(&["small", "large"]), 10),
            (screen(2), 13),
        ];

        for (spec, start) in cases {
            let mut previous: Option<Money> = None;
            for quantity in start..=200 {
                let b = compute_price(&request(450, quantity, spec.clone()), &rates).unwrap();
                if let Some(prev) = previous {
                    assert!(
                        b.unit_price <= prev,
                        "{} rose at quantity {quantity}: {} > {prev}",
                        spec.method(),
                        b.unit_price
                    );
                }
                previous = Some(b.unit_price);
            }
        }
    }

    #[test]
    fn test_ltm_per_unit_iff_flagged() {
        let rates = all_rates();
        let specs = [
            (embroidery(8000, LtmDistribution::ActualQuantity), 1),
            (embroidery(8000, LtmDistribution::ReferenceQuantity(3)), 1),
            (cap(8000), 1),
            (dtg(&["FF"]), 1),
            (dtf(&["medium"]), 10),
            (screen(1), 13),
        ];

        for (spec, start) in specs {
            for quantity in start..=150 {
                let b = compute_price(&request(399, quantity, spec.clone()), &rates).unwrap();
                assert_eq!(
                    b.ltm_fee_per_unit.is_positive(),
                    b.is_least_than_minimum,
                    "{} at quantity {quantity}",
                    spec.method()
                );
                assert_eq!(b.ltm_fee_total.is_positive(), b.is_least_than_minimum);
            }
        }
    }

    #[test]
    fn test_ltm_flag_follows_floored_share() {
        let mut rates = all_rates();
        if let Some(dtf) = rates.dtf.as_mut() {
            for tier in dtf.tiers.iter_mut().filter(|t| t.label == "10-23") {
                tier.ltm_fee = Money::from_cents(15);
            }
        }
        if let Some(dtg) = rates.dtg.as_mut() {
            dtg.synthetic_tier.ltm_fee = Money::zero();
        }

        for (spec, start) in [(dtf(&["small"]), 10), (dtg(&["LC"]), 1)] {
            for quantity in start..=30 {
                let b = compute_price(&request(500, quantity, spec.clone()), &rates).unwrap();
                assert_eq!(
                    b.ltm_fee_per_unit.is_positive(),
                    b.is_least_than_minimum,
                    "{} at quantity {quantity}",
                    spec.method()
                );
            }
        }
    }

    #[test]
    fn test_dtf_locations_are_additive() {
        let rates = all_rates();
        for quantity in [10, 18, 30, 60, 150] {
            let a = compute_price(&request(570, quantity, dtf(&["small"])), &rates).unwrap();
            let b = compute_price(&request(570, quantity, dtf(&["large"])), &rates).unwrap();
            let ab = compute_price(&request(570, quantity, dtf(&["small", "large"])), &rates).unwrap();

            let marginal_b = b.decoration_component + b.labor_component + b.freight_component;
            assert_eq!(ab.rounded_from, a.rounded_from + marginal_b);
            assert_eq!(ab.garment_component, a.garment_component);
        }
    }

    #[test]
    fn test_unit_price_is_rounded_raw_subtotal() {
        let rates = all_rates();
        for quantity in [5, 12, 24, 37, 99] {
            let b = compute_price(&request(777, quantity, dtg(&["LC_FF"])), &rates).unwrap();
            let raw = b.garment_component
                + b.decoration_component
                + b.labor_component
                + b.freight_component
                + b.ltm_fee_per_unit;
            assert_eq!(b.rounded_from, raw);
            assert_eq!(b.unit_price, round_up(raw));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_calls_share_rate_tables() {
        let rates = Arc::new(all_rates());
        let expected = compute_price(&request(500, 30, dtf(&["medium", "large"])), &rates).unwrap();

        let mut handles = Vec::new();
        for i in 0..64 {
            let rates = Arc::clone(&rates);
            handles.push(tokio::spawn(async move {
                let spec = if i % 2 == 0 {
                    dtf(&["medium", "large"])
                } else {
                    dtg(&["LC"])
                };
                compute_price(&request(500, 30, spec), &rates)
            }));
        }

        for (i, handle) in handles.into_iter().enumerate() {
            let b = handle.await.unwrap().unwrap();
            if i % 2 == 0 {
                assert_eq!(b, expected);
            } else {
                assert_eq!(b.method, DecorationMethod::Dtg);
            }
        }
    }
}
