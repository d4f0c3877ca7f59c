//! # Rate Table Loader
//!
//! Reads one bundle file per method from the configured directory.
//!
//! ```text
//! rates/
//! ├── embroidery.json       ──► RateTables.embroidery
//! ├── cap_embroidery.json   ──► RateTables.cap_embroidery
//! ├── dtg.json              ──► RateTables.dtg   (+ synthetic rule from config)
//! ├── dtf.json              ──► RateTables.dtf
//! └── screen_print.json     ──► RateTables.screen_print
//! ```
//!
//! A missing file leaves that method unloaded; requests for it fail with
//! `MissingTierData`. A present but broken file fails the whole load.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use decor_core::RateTables;
use serde::Deserialize;
use tracing::{info, warn};

use crate::bundle::{parse_bundle, DtfBundle, DtgBundle, EmbroideryBundle, ScreenPrintBundle};
use crate::config::RatesConfig;
use crate::convert::{to_dtf_rates, to_dtg_rates, to_embroidery_rates, to_screen_print_rates};
use crate::error::{RatesError, RatesResult};

pub const EMBROIDERY_FILE: &str = "embroidery.json";
pub const CAP_EMBROIDERY_FILE: &str = "cap_embroidery.json";
pub const DTG_FILE: &str = "dtg.json";
pub const DTF_FILE: &str = "dtf.json";
pub const SCREEN_PRINT_FILE: &str = "screen_print.json";

/// Loads every bundle found in `config.rates_dir`.
pub fn load_rate_tables(config: &RatesConfig) -> RatesResult<RateTables> {
    let dir = config.rates_dir.as_path();
    info!(dir = %dir.display(), "Loading rate bundles");

    let mut tables = RateTables::default();

    if let Some(bundle) = read_bundle::<EmbroideryBundle>(dir, EMBROIDERY_FILE)? {
        tables.embroidery = Some(to_embroidery_rates(&bundle)?);
    }
    if let Some(bundle) = read_bundle::<EmbroideryBundle>(dir, CAP_EMBROIDERY_FILE)? {
        tables.cap_embroidery = Some(to_embroidery_rates(&bundle)?);
    }
    if let Some(bundle) = read_bundle::<DtgBundle>(dir, DTG_FILE)? {
        tables.dtg = Some(to_dtg_rates(&bundle, &config.dtg_synthetic_rule())?);
    }
    if let Some(bundle) = read_bundle::<DtfBundle>(dir, DTF_FILE)? {
        tables.dtf = Some(to_dtf_rates(&bundle)?);
    }
    if let Some(bundle) = read_bundle::<ScreenPrintBundle>(dir, SCREEN_PRINT_FILE)? {
        tables.screen_print = Some(to_screen_print_rates(&bundle)?);
    }

    let loaded = [
        tables.embroidery.is_some(),
        tables.cap_embroidery.is_some(),
        tables.dtg.is_some(),
        tables.dtf.is_some(),
        tables.screen_print.is_some(),
    ]
    .iter()
    .filter(|loaded| **loaded)
    .count();

    if loaded == 0 {
        return Err(RatesError::NoBundles {
            dir: dir.to_path_buf(),
        });
    }

    info!(methods = loaded, "Rate tables loaded");
    Ok(tables)
}

/// Reads and parses one bundle; `Ok(None)` when the file does not exist.
fn read_bundle<T: for<'de> Deserialize<'de>>(dir: &Path, file: &str) -> RatesResult<Option<T>> {
    let path = dir.join(file);
    let json = match fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "Bundle not found, method will be unavailable");
            return Ok(None);
        }
        Err(source) => return Err(RatesError::Io { path, source }),
    };

    parse_bundle(&json, file).map(Some)
}
