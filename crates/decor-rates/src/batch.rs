//! # Batch Pricing
//!
//! Prices many requests against one shared, read-only set of rate tables.
//!
//! ```text
//! requests ──► spawn one task each ──► Semaphore(max_workers) ──► compute_price
//!                                                                     │
//! outcomes (same order as requests) ◄─────────── join in order ◄──────┘
//! ```
//!
//! One failing request never aborts the batch; its slot holds the error.

use std::sync::Arc;

use decor_core::{compute_price, PriceBreakdown, PricingRequest, RateTables};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// The result of pricing one request in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PricingOutcome {
    Priced { breakdown: PriceBreakdown },
    Failed { error: String },
}

impl PricingOutcome {
    pub fn is_priced(&self) -> bool {
        matches!(self, PricingOutcome::Priced { .. })
    }
}

/// Prices `requests` with at most `max_workers` running at once.
pub async fn price_batch(
    requests: Vec<PricingRequest>,
    rates: Arc<RateTables>,
    max_workers: usize,
) -> Vec<PricingOutcome> {
    let semaphore = Arc::new(Semaphore::new(max_workers.max(1)));
    debug!(requests = requests.len(), max_workers, "Pricing batch");

    let handles: Vec<_> = requests
        .into_iter()
        .map(|request| {
            let semaphore = semaphore.clone();
            let rates = rates.clone();
            tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return PricingOutcome::Failed {
                            error: e.to_string(),
                        }
                    }
                };
                match compute_price(&request, &rates) {
                    Ok(breakdown) => PricingOutcome::Priced { breakdown },
                    Err(e) => PricingOutcome::Failed {
                        error: e.to_string(),
                    },
                }
            })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        let outcome = handle.await.unwrap_or_else(|e| PricingOutcome::Failed {
            error: format!("pricing task failed: {e}"),
        });
        outcomes.push(outcome);
    }

    let failed = outcomes.iter().filter(|o| !o.is_priced()).count();
    if failed > 0 {
        warn!(failed, total = outcomes.len(), "Some requests could not be priced");
    }
    outcomes
}
