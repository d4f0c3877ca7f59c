//! # Cap Embroidery Pricing
//!
//! Same stitch rules as flat embroidery, priced against the cap tables
//! (8000-stitch base, $1.00 per thousand in production data). A request
//! never falls back to the flat embroidery tables.

use super::embroidery::price_stitched;
use super::PricingStrategy;
use crate::error::CoreResult;
use crate::money::Money;
use crate::rates::RateTables;
use crate::types::{DecorationMethod, EmbroiderySpec, PriceBreakdown};

#[derive(Debug, Clone, Copy, Default)]
pub struct CapEmbroideryStrategy;

impl PricingStrategy for CapEmbroideryStrategy {
    type Spec = EmbroiderySpec;

    fn method(&self) -> DecorationMethod {
        DecorationMethod::CapEmbroidery
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
            rates.cap_embroidery()?,
            garment_cost,
            quantity,
            spec,
        )
    }
}
