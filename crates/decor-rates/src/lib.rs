//! # decor-rates: Rate Table Boundary for Decor Pricing
//!
//! This crate loads upstream pricing bundles, validates them, and hands the
//! pricing engine canonical [`RateTables`]. It also prices batches of
//! requests concurrently.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Decor Pricing Data Flow                          │
//! │                                                                         │
//! │  rates/*.json  (upstream field names: tiersR, TierLabel, ...)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   decor-rates (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    bundle     │    │    convert    │    │    loader    │  │   │
//! │  │   │ serde shapes  │───►│ validation +  │───►│ one file per │  │   │
//! │  │   │               │    │ canonical map │    │ method       │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                    │            │   │
//! │  │   config (env) ────────────────────────────────────┤            │   │
//! │  │                                                    ▼            │   │
//! │  │                                     batch (Semaphore fan-out)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  decor-core PriceEngine  (pure, synchronous)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Environment configuration
//! - [`bundle`] - Upstream bundle schemas
//! - [`convert`] - Bundle to canonical table conversion
//! - [`loader`] - Reads bundle files from the rates directory
//! - [`batch`] - Concurrent batch pricing
//! - [`error`] - Rate loading error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use decor_rates::{load_rate_tables, price_batch, RatesConfig};
//! use std::sync::Arc;
//!
//! let config = RatesConfig::load()?;
//! let rates = Arc::new(load_rate_tables(&config)?);
//! let outcomes = price_batch(requests, rates, config.max_workers).await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod batch;
pub mod bundle;
pub mod config;
pub mod convert;
pub mod error;
pub mod loader;

// =============================================================================
// Re-exports
// =============================================================================

pub use batch::{price_batch, PricingOutcome};
pub use config::{ConfigError, RatesConfig};
pub use error::{RatesError, RatesResult};
pub use loader::load_rate_tables;

pub use decor_core::RateTables;
