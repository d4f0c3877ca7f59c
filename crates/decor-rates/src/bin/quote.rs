//! # Batch Quote Tool
//!
//! Prices a JSON array of pricing requests against the configured rates.
//!
//! ## Usage
//! ```bash
//! # Read requests from stdin
//! cat requests.json | cargo run -p decor-rates --bin quote
//!
//! # Read requests from a file
//! cargo run -p decor-rates --bin quote -- --input requests.json
//!
//! # Point at another rates directory
//! DECOR_RATES_DIR=/srv/rates cargo run -p decor-rates --bin quote -- -i requests.json
//! ```
//!
//! ## Input
//! ```json
//! [{"garmentCost": 3.53, "quantity": 24,
//!   "decoration": {"method": "dtg", "locationCodes": ["LC"]}}]
//! ```
//!
//! ## Output
//! A JSON array on stdout, one `{"status": "priced" | "failed", ...}` per
//! request in input order. Logs go to stderr.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::sync::Arc;

use decor_core::PricingRequest;
use decor_rates::{load_rate_tables, price_batch, RatesConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let mut input: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" | "-i" => {
                if i + 1 < args.len() {
                    input = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Decor Pricing Batch Quote");
                println!();
                println!("Usage: quote [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -i, --input <PATH>   JSON array of pricing requests (default: stdin)");
                println!("  -h, --help           Show this help message");
                println!();
                println!("Environment:");
                println!("  DECOR_RATES_DIR             Rate bundle directory (default: ./rates)");
                println!("  DECOR_DTG_SYNTHETIC_MAX     Top of the DTG small-order tier (default: 23)");
                println!("  DECOR_DTG_SYNTHETIC_BORROW  Tier it borrows from (default: 24-47)");
                println!("  DECOR_DTG_LTM_FEE           Its fixed fee (default: 50.00)");
                println!("  DECOR_MAX_WORKERS           Concurrent pricing tasks (default: 5)");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    init_tracing();

    let config = RatesConfig::load()?;
    let rates = Arc::new(load_rate_tables(&config)?);

    let json = match &input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let requests: Vec<PricingRequest> = serde_json::from_str(&json)?;
    info!(requests = requests.len(), "Pricing requests");

    let outcomes = price_batch(requests, rates, config.max_workers).await;
    println!("{}", serde_json::to_string_pretty(&outcomes)?);

    Ok(())
}

/// Logs go to stderr so stdout stays valid JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,decor_core=info,decor_rates=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
