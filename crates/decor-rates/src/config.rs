//! Rates configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use decor_core::rates::SyntheticTierRule;
use decor_core::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Rate loading and batch pricing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatesConfig {
    /// Directory holding one bundle file per method
    pub rates_dir: PathBuf,

    /// Upper quantity of the DTG small-order tier (it always starts at 1)
    pub dtg_synthetic_max: i64,

    /// Tier label the DTG small-order tier borrows margin and costs from
    pub dtg_synthetic_borrow: String,

    /// Fixed fee of the DTG small-order tier (zero disables it)
    pub dtg_ltm_fee: Decimal,

    /// Concurrent pricing tasks in the quote binary
    pub max_workers: usize,
}

impl RatesConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = RatesConfig {
            rates_dir: lookup("DECOR_RATES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./rates")),

            dtg_synthetic_max: parse(&lookup, "DECOR_DTG_SYNTHETIC_MAX", "23")?,

            dtg_synthetic_borrow: lookup("DECOR_DTG_SYNTHETIC_BORROW")
                .unwrap_or_else(|| "24-47".to_string()),

            dtg_ltm_fee: parse(&lookup, "DECOR_DTG_LTM_FEE", "50.00")?,

            max_workers: parse(&lookup, "DECOR_MAX_WORKERS", "5")?,
        };

        if config.dtg_synthetic_max < 1 {
            return Err(ConfigError::InvalidValue("DECOR_DTG_SYNTHETIC_MAX".to_string()));
        }
        // Zero is allowed: small DTG orders then carry no LTM fee or flag.
        if config.dtg_ltm_fee < Decimal::ZERO {
            return Err(ConfigError::InvalidValue("DECOR_DTG_LTM_FEE".to_string()));
        }
        if config.max_workers == 0 {
            return Err(ConfigError::InvalidValue("DECOR_MAX_WORKERS".to_string()));
        }
        if config.dtg_synthetic_borrow.trim().is_empty() {
            return Err(ConfigError::MissingRequired(
                "DECOR_DTG_SYNTHETIC_BORROW".to_string(),
            ));
        }

        Ok(config)
    }

    /// The DTG small-order rule described by this configuration.
    pub fn dtg_synthetic_rule(&self) -> SyntheticTierRule {
        SyntheticTierRule {
            label: format!("1-{}", self.dtg_synthetic_max),
            min_qty: 1,
            max_qty: self.dtg_synthetic_max,
            borrow_from: self.dtg_synthetic_borrow.clone(),
            ltm_fee: Money::from_decimal(self.dtg_ltm_fee),
        }
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError> {
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RatesConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.rates_dir, PathBuf::from("./rates"));
        assert_eq!(config.dtg_synthetic_max, 23);
        assert_eq!(config.dtg_synthetic_borrow, "24-47");
        assert_eq!(config.dtg_ltm_fee, dec!(50.00));
        assert_eq!(config.max_workers, 5);

        let rule = config.dtg_synthetic_rule();
        assert_eq!(rule.label, "1-23");
        assert_eq!(rule.ltm_fee, Money::from_cents(5000));
    }

    #[test]
    fn test_overrides() {
        let config = RatesConfig::from_lookup(lookup_from(&[
            ("DECOR_RATES_DIR", "/srv/rates"),
            ("DECOR_DTG_SYNTHETIC_MAX", "11"),
            ("DECOR_DTG_SYNTHETIC_BORROW", "12-23"),
            ("DECOR_DTG_LTM_FEE", "40"),
            ("DECOR_MAX_WORKERS", "16"),
        ]))
        .unwrap();

        assert_eq!(config.rates_dir, PathBuf::from("/srv/rates"));
        assert_eq!(config.dtg_synthetic_rule().label, "1-11");
        assert_eq!(config.dtg_synthetic_rule().borrow_from, "12-23");
        assert_eq!(config.max_workers, 16);
    }

    #[test]
    fn test_zero_dtg_fee_is_accepted() {
        let config =
            RatesConfig::from_lookup(lookup_from(&[("DECOR_DTG_LTM_FEE", "0")])).unwrap();
        assert!(config.dtg_synthetic_rule().ltm_fee.is_zero());
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("DECOR_DTG_SYNTHETIC_MAX", "twenty"),
            ("DECOR_DTG_SYNTHETIC_MAX", "0"),
            ("DECOR_DTG_LTM_FEE", "-5"),
            ("DECOR_MAX_WORKERS", "0"),
        ] {
            let err = RatesConfig::from_lookup(lookup_from(&[(key, value)])).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid value for {key}"));
        }

        assert!(matches!(
            RatesConfig::from_lookup(lookup_from(&[("DECOR_DTG_SYNTHETIC_BORROW", " ")])),
            Err(ConfigError::MissingRequired(_))
        ));
    }
}
