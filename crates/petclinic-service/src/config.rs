//! # Service Configuration
//!
//! Pricing constants, service-charge amounts and cache settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PETCLINIC_BASE_CHARGE_CENTS=15000                                  │
//! │     PETCLINIC_CACHE_TTL_SECS=60                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/petclinic/petclinic.toml (Linux)                         │
//! │     ~/Library/Application Support/org.petclinic.petclinic/ (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [pricing]
//! base_rare_coef_bps = 12000
//! rare_infancy_coef_bps = 14000
//! discount_min_score = 10
//! discount_pre_visit = 2
//! old_visit_threshold_days = 100
//! infant_age = 1
//! adult_age = 3
//! infancy_boundary = "inclusive"   # inclusive | exclusive
//!
//! [pricing.tier_discounts]
//! new_bps = 9500
//! silver_bps = 9700
//! gold_bps = 9000
//!
//! [service_charge]
//! base_charge_cents = 15000
//! base_price_per_pet_cents = 20000
//!
//! [cache]
//! ttl_secs = 300
//! ```

use std::path::PathBuf;
use std::time::Duration;

use petclinic_core::validation::validate_amount;
use petclinic_core::{InfancyBoundary, Money, PricingConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};

// =============================================================================
// Service Charge
// =============================================================================

/// Amounts fed to the calculators when quoting an owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceChargeConfig {
    /// Flat charge per quote.
    #[serde(rename = "base_charge_cents", default = "default_base_charge")]
    pub base_charge: Money,

    /// Unit price before coefficients.
    #[serde(rename = "base_price_per_pet_cents", default = "default_base_price_per_pet")]
    pub base_price_per_pet: Money,
}

fn default_base_charge() -> Money {
    Money::from_cents(15000)
}

fn default_base_price_per_pet() -> Money {
    Money::from_cents(20000)
}

impl Default for ServiceChargeConfig {
    fn default() -> Self {
        ServiceChargeConfig {
            base_charge: default_base_charge(),
            base_price_per_pet: default_base_price_per_pet(),
        }
    }
}

// =============================================================================
// Cache
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds a cached pet stays fresh. 0 disables caching.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub service_charge: ServiceChargeConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

impl ServiceConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`petclinic.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ServiceResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading service config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load service config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration as pretty TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> ServiceResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ServiceError::ConfigLoadFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Service config saved");
        Ok(())
    }

    /// Validates pricing constants and service-charge amounts.
    pub fn validate(&self) -> ServiceResult<()> {
        self.pricing.validate()?;
        validate_amount("base_charge", self.service_charge.base_charge)?;
        validate_amount("base_price_per_pet", self.service_charge.base_price_per_pet)?;
        Ok(())
    }

    /// Applies `PETCLINIC_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(cents) = parse_override::<i64>(&lookup, "PETCLINIC_BASE_CHARGE_CENTS") {
            debug!(cents, "Overriding base charge from environment");
            self.service_charge.base_charge = Money::from_cents(cents);
        }

        if let Some(cents) = parse_override::<i64>(&lookup, "PETCLINIC_BASE_PRICE_PER_PET_CENTS") {
            debug!(cents, "Overriding base price per pet from environment");
            self.service_charge.base_price_per_pet = Money::from_cents(cents);
        }

        if let Some(secs) = parse_override::<u64>(&lookup, "PETCLINIC_CACHE_TTL_SECS") {
            debug!(secs, "Overriding cache TTL from environment");
            self.cache.ttl_secs = secs;
        }

        if let Some(days) = parse_override::<u32>(&lookup, "PETCLINIC_OLD_VISIT_THRESHOLD_DAYS") {
            debug!(days, "Overriding old-visit threshold from environment");
            self.pricing.old_visit_threshold_days = days;
        }

        if let Some(boundary) = lookup("PETCLINIC_INFANCY_BOUNDARY") {
            match boundary.to_lowercase().as_str() {
                "inclusive" => self.pricing.infancy_boundary = InfancyBoundary::Inclusive,
                "exclusive" => self.pricing.infancy_boundary = InfancyBoundary::Exclusive,
                _ => warn!(boundary = %boundary, "Unknown infancy boundary in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "petclinic", "petclinic")
            .map(|dirs| dirs.config_dir().join("petclinic.toml"))
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparsable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petclinic_core::{Coefficient, CoreError};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.service_charge.base_charge.cents(), 15000);
        assert_eq!(config.service_charge.base_price_per_pet.cents(), 20000);
        assert_eq!(config.cache.ttl(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("petclinic.toml");
        std::fs::write(
            &path,
            r#"
[pricing]
discount_min_score = 4
infancy_boundary = "exclusive"

[pricing.tier_discounts]
new_bps = 8000

[service_charge]
base_charge_cents = 500

[cache]
ttl_secs = 0
"#,
        )
        .unwrap();

        let config = ServiceConfig::load(Some(path)).unwrap();
        assert_eq!(config.pricing.discount_min_score, 4);
        assert_eq!(config.pricing.infancy_boundary, InfancyBoundary::Exclusive);
        assert_eq!(config.pricing.tier_discounts.new, Coefficient::from_bps(8000));
        assert_eq!(config.pricing.old_visit_threshold_days, 100);
        assert_eq!(config.service_charge.base_charge.cents(), 500);
        assert_eq!(config.service_charge.base_price_per_pet.cents(), 20000);
        assert_eq!(config.cache.ttl_secs, 0);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.service_charge, ServiceChargeConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("petclinic.toml");
        std::fs::write(&path, "[pricing\nbroken").unwrap();

        assert!(matches!(
            ServiceConfig::load(Some(path.clone())),
            Err(ServiceError::TomlDe(_))
        ));
        assert_eq!(ServiceConfig::load_or_default(Some(path)), ServiceConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("petclinic.toml");
        std::fs::write(&path, "[pricing]\nold_visit_threshold_days = 0\n").unwrap();

        assert!(matches!(
            ServiceConfig::load(Some(path)),
            Err(ServiceError::Core(CoreError::Validation(_)))
        ));
    }

    #[test]
    fn test_negative_charge_is_rejected() {
        let mut config = ServiceConfig::default();
        config.service_charge.base_charge = Money::from_cents(-1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("petclinic.toml");

        let mut config = ServiceConfig::default();
        config.pricing.adult_age = 5;
        config.cache.ttl_secs = 30;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("base_charge_cents = 15000"));
        assert_eq!(ServiceConfig::load(Some(path)).unwrap(), config);
    }

    #[test]
    fn test_overrides() {
        let mut config = ServiceConfig::default();
        config.apply_overrides(env(&[
            ("PETCLINIC_BASE_CHARGE_CENTS", "100"),
            ("PETCLINIC_BASE_PRICE_PER_PET_CENTS", " 250 "),
            ("PETCLINIC_CACHE_TTL_SECS", "5"),
            ("PETCLINIC_OLD_VISIT_THRESHOLD_DAYS", "30"),
            ("PETCLINIC_INFANCY_BOUNDARY", "Exclusive"),
        ]));

        assert_eq!(config.service_charge.base_charge.cents(), 100);
        assert_eq!(config.service_charge.base_price_per_pet.cents(), 250);
        assert_eq!(config.cache.ttl_secs, 5);
        assert_eq!(config.pricing.old_visit_threshold_days, 30);
        assert_eq!(config.pricing.infancy_boundary, InfancyBoundary::Exclusive);
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = ServiceConfig::default();
        config.apply_overrides(env(&[
            ("PETCLINIC_CACHE_TTL_SECS", "soon"),
            ("PETCLINIC_INFANCY_BOUNDARY", "sometimes"),
        ]));
        assert_eq!(config, ServiceConfig::default());
    }
}
