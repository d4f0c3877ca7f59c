//! # Tier Resolution
//!
//! Maps an order quantity to the tier row that governs margin and fee.
//!
//! ## Resolution Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A tier matches when  min_qty <= quantity  and  (max_qty is None or    │
//! │                       quantity <= max_qty)                              │
//! │                                                                         │
//! │   matches = 0  ──►  NoTierForQuantity                                   │
//! │   matches = 1  ──►  that tier                                           │
//! │   matches > 1  ──►  AmbiguousTier  (never "first match wins")           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The DTG synthetic small-order tier is derived here as well, so the
//! strategies never special-case it in their arithmetic.

use crate::error::{CoreError, CoreResult};
use crate::rates::SyntheticTierRule;
use crate::types::QuantityTier;

// =============================================================================
// Resolved Tier
// =============================================================================

/// The outcome of tier resolution for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTier {
    /// The governing tier (owned, since a synthetic tier has no source row).
    pub tier: QuantityTier,
    /// Quantity used to look up decoration cost rows. Equals the order
    /// quantity except for a synthetic tier, which prices at the minimum
    /// of the tier it borrows from.
    pub lookup_quantity: i64,
    pub synthetic: bool,
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves the single tier containing `quantity`.
///
/// ## Example
/// ```rust
/// use decor_core::tier::resolve;
/// use decor_core::{MarginDenominator, Money, QuantityTier};
/// use rust_decimal_macros::dec;
///
/// let tier = |label: &str, min, max| QuantityTier {
///     label: label.to_string(),
///     min_qty: min,
///     max_qty: max,
///     margin_denominator: MarginDenominator::try_new(dec!(0.6)).unwrap(),
///     ltm_fee: Money::zero(),
/// };
/// let tiers = vec![tier("24-47", 24, Some(47)), tier("48-71", 48, Some(71)), tier("72+", 72, None)];
///
/// assert_eq!(resolve(50, &tiers).unwrap().label, "48-71");
/// assert!(resolve(5, &tiers).is_err());
/// ```
pub fn resolve(quantity: i64, tiers: &[QuantityTier]) -> CoreResult<&QuantityTier> {
    let matches: Vec<&QuantityTier> = tiers.iter().filter(|t| t.contains(quantity)).collect();

    match matches.as_slice() {
        [] => Err(CoreError::NoTierForQuantity { quantity }),
        [only] => Ok(*only),
        many => Err(CoreError::AmbiguousTier {
            quantity,
            labels: many.iter().map(|t| t.label.clone()).collect(),
        }),
    }
}

/// Resolves `quantity` and wraps the row as a non-synthetic `ResolvedTier`.
pub fn resolve_owned(quantity: i64, tiers: &[QuantityTier]) -> CoreResult<ResolvedTier> {
    let tier = resolve(quantity, tiers)?;
    Ok(ResolvedTier {
        tier: tier.clone(),
        lookup_quantity: quantity,
        synthetic: false,
    })
}

/// Returns the tier with the smallest `min_qty`.
pub fn lowest_tier(tiers: &[QuantityTier]) -> Option<&QuantityTier> {
    tiers.iter().min_by_key(|t| t.min_qty)
}

// =============================================================================
// Synthetic Tier (DTG small orders)
// =============================================================================

/// Builds the synthetic tier described by `rule` from the real tier table.
///
/// The result reuses the borrowed tier's margin, carries the rule's fixed
/// fee, and looks up costs at the borrowed tier's minimum quantity.
pub fn derive_synthetic_tier(
    rule: &SyntheticTierRule,
    tiers: &[QuantityTier],
) -> CoreResult<ResolvedTier> {
    let mut borrowed = tiers.iter().filter(|t| t.label == rule.borrow_from);
    let source = borrowed.next().ok_or_else(|| CoreError::InvalidTierData {
        label: rule.label.clone(),
        reason: format!("borrows from missing tier '{}'", rule.borrow_from),
    })?;
    if borrowed.next().is_some() {
        return Err(CoreError::InvalidTierData {
            label: rule.label.clone(),
            reason: format!("tier '{}' appears more than once", rule.borrow_from),
        });
    }

    Ok(ResolvedTier {
        tier: QuantityTier {
            label: rule.label.clone(),
            min_qty: rule.min_qty,
            max_qty: Some(rule.max_qty),
            margin_denominator: source.margin_denominator,
            ltm_fee: rule.ltm_fee,
        },
        lookup_quantity: source.min_qty,
        synthetic: true,
    })
}

/// Resolves a DTG quantity: the synthetic range takes precedence, every
/// other quantity resolves against the real tiers.
pub fn resolve_with_synthetic(
    quantity: i64,
    tiers: &[QuantityTier],
    rule: &SyntheticTierRule,
) -> CoreResult<ResolvedTier> {
    if quantity >= rule.min_qty && quantity <= rule.max_qty {
        derive_synthetic_tier(rule, tiers)
    } else {
        resolve_owned(quantity, tiers)
    }
}

// =============================================================================
// Partition Check
// =============================================================================

/// Checks that tiers form non-overlapping, gap-free ranges of positive
/// quantities.
///
/// ## Rules
/// - `min_qty >= 1`, and `max_qty >= min_qty` when bounded
/// - Margin denominators are already range-checked by `MarginDenominator`
/// - LTM fees must not be negative
/// - Sorted by `min_qty`, each tier starts exactly one past the previous
///   tier's `max_qty`; only the last tier may be unbounded
///
/// The table need not start at 1 (DTG's real table starts at 24).
pub fn check_partition(tiers: &[QuantityTier]) -> CoreResult<()> {
    for tier in tiers {
        if tier.min_qty < 1 {
            return Err(CoreError::InvalidTierData {
                label: tier.label.clone(),
                reason: format!("min_qty {} is not positive", tier.min_qty),
            });
        }
        if let Some(max) = tier.max_qty {
            if max < tier.min_qty {
                return Err(CoreError::InvalidTierData {
                    label: tier.label.clone(),
                    reason: format!("max_qty {} is below min_qty {}", max, tier.min_qty),
                });
            }
        }
        if tier.ltm_fee.is_negative() {
            return Err(CoreError::InvalidTierData {
                label: tier.label.clone(),
                reason: "LTM fee is negative".to_string(),
            });
        }
    }

    let mut sorted: Vec<&QuantityTier> = tiers.iter().collect();
    sorted.sort_by_key(|t| t.min_qty);

    for pair in sorted.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        match prev.max_qty {
            None => {
                return Err(CoreError::TierOverlap {
                    first: prev.label.clone(),
                    second: next.label.clone(),
                })
            }
            Some(max) if next.min_qty <= max => {
                return Err(CoreError::TierOverlap {
                    first: prev.label.clone(),
                    second: next.label.clone(),
                })
            }
            Some(max) if next.min_qty > max + 1 => {
                return Err(CoreError::TierGap {
                    from: max + 1,
                    to: next.min_qty - 1,
                })
            }
            Some(_) => {}
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
