//! # Upstream Bundle Schemas
//!
//! Explicit serde shapes for the per-method pricing bundles the upstream
//! pricing service returns. Every upstream field name lives in this file;
//! nothing downstream of [`crate::convert`] ever sees one.
//!
//! ## Bundle Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  every bundle   tiersR[]  TierLabel MinQuantity MaxQuantity             │
//! │                           MarginDenominator LTM_Fee                     │
//! │                                                                         │
//! │  embroidery     allEmbroideryCostsR[]  TierLabel StitchCount            │
//! │                   EmbroideryCost BaseStitchCount AdditionalStitchRate   │
//! │                 additionalLogo?  EmbroideryCost BaseStitchCount ...     │
//! │  dtg            allDtgCostsR[]  PrintLocationCode TierLabel PrintCost   │
//! │  dtf            allDtfCostsR[]  size min_quantity max_quantity          │
//! │                   unit_price PressingLaborCost                          │
//! │                 freightR[]  min_quantity max_quantity cost_per_transfer │
//! │  screen print   allScreenprintCostsR[]  TierLabel ColorCount            │
//! │                   BasePrintCost CostType                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown extra fields are ignored; missing required ones fail to parse.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{RatesError, RatesResult};

// =============================================================================
// Shared Rows
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TierRow {
    #[serde(rename = "TierLabel")]
    pub tier_label: String,
    #[serde(rename = "MinQuantity")]
    pub min_quantity: i64,
    /// Absent or null for an open-ended top tier.
    #[serde(rename = "MaxQuantity", default)]
    pub max_quantity: Option<i64>,
    #[serde(rename = "MarginDenominator")]
    pub margin_denominator: Decimal,
    /// Absent means no fee.
    #[serde(rename = "LTM_Fee", default)]
    pub ltm_fee: Option<Decimal>,
}

// =============================================================================
// Embroidery (flat and cap)
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbroideryCostRow {
    #[serde(rename = "TierLabel")]
    pub tier_label: String,
    #[serde(rename = "StitchCount")]
    pub stitch_count: i64,
    #[serde(rename = "EmbroideryCost")]
    pub embroidery_cost: Decimal,
    /// Defaults to `StitchCount` when the row omits it.
    #[serde(rename = "BaseStitchCount", default)]
    pub base_stitch_count: Option<i64>,
    #[serde(rename = "AdditionalStitchRate")]
    pub additional_stitch_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdditionalLogoRow {
    #[serde(rename = "EmbroideryCost")]
    pub embroidery_cost: Decimal,
    #[serde(rename = "BaseStitchCount")]
    pub base_stitch_count: i64,
    #[serde(rename = "AdditionalStitchRate")]
    pub additional_stitch_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbroideryBundle {
    #[serde(rename = "tiersR")]
    pub tiers: Vec<TierRow>,
    #[serde(rename = "allEmbroideryCostsR")]
    pub costs: Vec<EmbroideryCostRow>,
    #[serde(rename = "additionalLogo", default)]
    pub additional_logo: Option<AdditionalLogoRow>,
}

// =============================================================================
// DTG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DtgCostRow {
    #[serde(rename = "PrintLocationCode")]
    pub print_location_code: String,
    #[serde(rename = "TierLabel")]
    pub tier_label: String,
    #[serde(rename = "PrintCost")]
    pub print_cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DtgBundle {
    #[serde(rename = "tiersR")]
    pub tiers: Vec<TierRow>,
    #[serde(rename = "allDtgCostsR")]
    pub costs: Vec<DtgCostRow>,
}

// =============================================================================
// DTF
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DtfCostRow {
    /// Upstream size name, e.g. `Up to 9" x 12"`.
    pub size: String,
    pub min_quantity: i64,
    #[serde(default)]
    pub max_quantity: Option<i64>,
    pub unit_price: Decimal,
    #[serde(rename = "PressingLaborCost")]
    pub pressing_labor_cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FreightRow {
    pub min_quantity: i64,
    #[serde(default)]
    pub max_quantity: Option<i64>,
    pub cost_per_transfer: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DtfBundle {
    #[serde(rename = "tiersR")]
    pub tiers: Vec<TierRow>,
    #[serde(rename = "allDtfCostsR")]
    pub costs: Vec<DtfCostRow>,
    #[serde(rename = "freightR")]
    pub freight: Vec<FreightRow>,
}

// =============================================================================
// Screen Print
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CostType {
    PrimaryLocation,
    AdditionalLocation,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScreenPrintCostRow {
    #[serde(rename = "TierLabel")]
    pub tier_label: String,
    #[serde(rename = "ColorCount")]
    pub color_count: i64,
    #[serde(rename = "BasePrintCost")]
    pub base_print_cost: Decimal,
    #[serde(rename = "CostType")]
    pub cost_type: CostType,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScreenPrintBundle {
    #[serde(rename = "tiersR")]
    pub tiers: Vec<TierRow>,
    #[serde(rename = "allScreenprintCostsR")]
    pub costs: Vec<ScreenPrintCostRow>,
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses one bundle from JSON text. `what` names the bundle in errors.
pub fn parse_bundle<T: for<'de> Deserialize<'de>>(json: &str, what: &str) -> RatesResult<T> {
    serde_json::from_str(json).map_err(|source| RatesError::Json {
        what: what.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_tier_rows() {
        let json = r#"{
            "tiersR": [
                {"TierLabel": "1-7", "MinQuantity": 1, "MaxQuantity": 7, "MarginDenominator": 0.6, "LTM_Fee": 50},
                {"TierLabel": "72+", "MinQuantity": 72, "MarginDenominator": 0.6, "TargetMargin": 0}
            ],
            "allDtgCostsR": []
        }"#;
        let bundle: DtgBundle = parse_bundle(json, "dtg bundle").unwrap();

        assert_eq!(bundle.tiers[0].ltm_fee, Some(dec!(50)));
        assert_eq!(bundle.tiers[1].max_quantity, None);
        assert_eq!(bundle.tiers[1].ltm_fee, None);
    }

    #[test]
    fn test_missing_required_field_fails() {
        let json = r#"{"tiersR": [{"TierLabel": "1-7", "MinQuantity": 1, "MaxQuantity": 7}], "allDtgCostsR": []}"#;
        let err = parse_bundle::<DtgBundle>(json, "dtg bundle").unwrap_err();
        assert!(err.to_string().starts_with("Malformed dtg bundle"));
        assert!(err.to_string().contains("MarginDenominator"));
    }

    #[test]
    fn test_unknown_cost_type_fails() {
        let json = r#"{
            "tiersR": [],
            "allScreenprintCostsR": [
                {"TierLabel": "13-36", "ColorCount": 1, "BasePrintCost": 4.5, "CostType": "Sleeve"}
            ]
        }"#;
        assert!(parse_bundle::<ScreenPrintBundle>(json, "screen print bundle").is_err());
    }

    #[test]
    fn test_parse_dtf_bundle() {
        let json = r#"{
            "tiersR": [{"TierLabel": "10-23", "MinQuantity": 10, "MaxQuantity": 23, "MarginDenominator": 0.57, "LTM_Fee": 50}],
            "allDtfCostsR": [
                {"size": "Up to 5\" x 5\"", "min_quantity": 10, "max_quantity": 23, "unit_price": 6, "PressingLaborCost": 2, "quantity_range": "10-23"}
            ],
            "freightR": [{"min_quantity": 10, "max_quantity": 49, "cost_per_transfer": 0.5}]
        }"#;
        let bundle: DtfBundle = parse_bundle(json, "dtf bundle").unwrap();
        assert_eq!(bundle.costs[0].size, "Up to 5\" x 5\"");
        assert_eq!(bundle.freight[0].cost_per_transfer, dec!(0.5));
    }
}
