//! # Pricing Configuration
//!
//! The tunable constants of both calculators as one validated value.
//!
//! ## Configuration Format
//! Coefficients are stored in basis points (12000 = 1.2x).
//! ```toml
//! [pricing]
//! base_rare_coef_bps = 12000
//! rare_infancy_coef_bps = 14000
//! discount_min_score = 10
//! discount_pre_visit = 2
//! old_visit_threshold_days = 100
//! infant_age = 1
//! adult_age = 3
//! infancy_boundary = "inclusive"
//!
//! [pricing.tier_discounts]
//! new_bps = 9500
//! silver_bps = 9700
//! gold_bps = 9000
//! ```
//!
//! Reading this from disk is the service crate's job; this module only
//! defines the shape, the defaults and the validation.

use serde::{Deserialize, Serialize};

use crate::classify::{AgeClassifier, InfancyBoundary, VisitRecencyClassifier};
use crate::error::{CoreError, CoreResult};
use crate::money::Coefficient;
use crate::types::UserTier;
use crate::validation::{validate_coefficient, validate_positive, validate_range};
use crate::{
    ADULT_AGE, BASE_RARE_COEF, DISCOUNT_MIN_SCORE, DISCOUNT_PRE_VISIT, INFANT_AGE,
    OLD_VISIT_THRESH, RARE_INFANCY_COEF,
};

// =============================================================================
// Tier Discounts
// =============================================================================

/// Discount rate per customer tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDiscounts {
    #[serde(rename = "new_bps", default = "default_new_rate")]
    pub new: Coefficient,
    #[serde(rename = "silver_bps", default = "default_silver_rate")]
    pub silver: Coefficient,
    #[serde(rename = "gold_bps", default = "default_gold_rate")]
    pub gold: Coefficient,
}

fn default_new_rate() -> Coefficient {
    Coefficient::from_bps(9500)
}

fn default_silver_rate() -> Coefficient {
    Coefficient::from_bps(9700)
}

fn default_gold_rate() -> Coefficient {
    Coefficient::from_bps(9000)
}

impl Default for TierDiscounts {
    fn default() -> Self {
        TierDiscounts {
            new: default_new_rate(),
            silver: default_silver_rate(),
            gold: default_gold_rate(),
        }
    }
}

impl TierDiscounts {
    /// Discount rate configured for `tier`.
    pub fn rate(&self, tier: UserTier) -> Coefficient {
        match tier {
            UserTier::New => self.new,
            UserTier::Silver => self.silver,
            UserTier::Gold => self.gold,
        }
    }
}

// =============================================================================
// Pricing Config
// =============================================================================

/// All pricing constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Premium applied to every pet in the tiered calculator and to rare
    /// pets in the per-user calculator.
    #[serde(rename = "base_rare_coef_bps", default = "default_base_rare_coef")]
    pub base_rare_coef: Coefficient,

    /// Extra premium for infant pets in the tiered calculator.
    #[serde(rename = "rare_infancy_coef_bps", default = "default_rare_infancy_coef")]
    pub rare_infancy_coef: Coefficient,

    /// Loyalty score at which the discount transform starts firing.
    #[serde(default = "default_discount_min_score")]
    pub discount_min_score: u32,

    /// Multiplier of the running total on the all-new-visits branch.
    #[serde(default = "default_discount_pre_visit")]
    pub discount_pre_visit: u32,

    /// Visits strictly older than this many days are "old".
    #[serde(default = "default_old_visit_threshold")]
    pub old_visit_threshold_days: u32,

    /// Infancy cutoff age in whole years.
    #[serde(default = "default_infant_age")]
    pub infant_age: u32,

    /// Reference age for the early-visit window of non-infant pets.
    #[serde(default = "default_adult_age")]
    pub adult_age: u32,

    #[serde(default)]
    pub infancy_boundary: InfancyBoundary,

    #[serde(default)]
    pub tier_discounts: TierDiscounts,
}

fn default_base_rare_coef() -> Coefficient {
    BASE_RARE_COEF
}
fn default_rare_infancy_coef() -> Coefficient {
    RARE_INFANCY_COEF
}
fn default_discount_min_score() -> u32 {
    DISCOUNT_MIN_SCORE
}
fn default_discount_pre_visit() -> u32 {
    DISCOUNT_PRE_VISIT
}
fn default_old_visit_threshold() -> u32 {
    OLD_VISIT_THRESH
}
fn default_infant_age() -> u32 {
    INFANT_AGE
}
fn default_adult_age() -> u32 {
    ADULT_AGE
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            base_rare_coef: default_base_rare_coef(),
            rare_infancy_coef: default_rare_infancy_coef(),
            discount_min_score: default_discount_min_score(),
            discount_pre_visit: default_discount_pre_visit(),
            old_visit_threshold_days: default_old_visit_threshold(),
            infant_age: default_infant_age(),
            adult_age: default_adult_age(),
            infancy_boundary: InfancyBoundary::default(),
            tier_discounts: TierDiscounts::default(),
        }
    }
}

impl PricingConfig {
    /// Validates the configuration.
    ///
    /// ## Rules
    /// - `old_visit_threshold_days > 0`: the has-old factor
    ///   `floor(max_age / threshold) + count` is then always >= 2
    /// - `discount_min_score > 0`
    /// - `discount_pre_visit >= 1`
    /// - `adult_age >= infant_age`
    /// - no coefficient or tier rate is zero
    pub fn validate(&self) -> CoreResult<()> {
        validate_positive("old_visit_threshold_days", self.old_visit_threshold_days as i64)?;
        validate_positive("discount_min_score", self.discount_min_score as i64)?;
        validate_positive("discount_pre_visit", self.discount_pre_visit as i64)?;
        validate_range(
            "adult_age",
            self.adult_age as i64,
            self.infant_age as i64,
            u32::MAX as i64,
        )?;
        validate_coefficient("base_rare_coef", self.base_rare_coef)?;
        validate_coefficient("rare_infancy_coef", self.rare_infancy_coef)?;
        validate_coefficient("tier_discounts.new", self.tier_discounts.new)?;
        validate_coefficient("tier_discounts.silver", self.tier_discounts.silver)?;
        validate_coefficient("tier_discounts.gold", self.tier_discounts.gold)?;
        Ok(())
    }

    /// Like [`validate`](Self::validate), but reports a single
    /// [`CoreError::InvalidConfig`] for callers that only need the message.
    pub fn ensure_valid(&self) -> CoreResult<()> {
        self.validate()
            .map_err(|e| CoreError::InvalidConfig(e.to_string()))
    }

    pub fn age_classifier(&self) -> AgeClassifier {
        AgeClassifier::new(self.infant_age, self.infancy_boundary)
    }

    pub fn recency_classifier(&self) -> VisitRecencyClassifier {
        VisitRecencyClassifier::new(self.old_visit_threshold_days as i64)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = PricingConfig::default();
        assert_eq!(config.base_rare_coef.bps(), 12000);
        assert_eq!(config.rare_infancy_coef.bps(), 14000);
        assert_eq!(config.discount_min_score, 10);
        assert_eq!(config.discount_pre_visit, 2);
        assert_eq!(config.old_visit_threshold_days, 100);
        assert_eq!(config.infant_age, 1);
        assert_eq!(config.adult_age, 3);
        assert_eq!(config.infancy_boundary, InfancyBoundary::Inclusive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tier_rates() {
        let discounts = TierDiscounts::default();
        assert_eq!(discounts.rate(UserTier::New).bps(), 9500);
        assert_eq!(discounts.rate(UserTier::Silver).bps(), 9700);
        assert_eq!(discounts.rate(UserTier::Gold).bps(), 9000);
    }

    #[test]
    fn test_validation_rejects_zero_threshold() {
        let config = PricingConfig {
            old_visit_threshold_days: 0,
            ..PricingConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(matches!(config.ensure_valid(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_validation_rejects_inverted_ages() {
        let config = PricingConfig {
            infant_age: 4,
            adult_age: 3,
            ..PricingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_coefficients() {
        let mut config = PricingConfig::default();
        config.tier_discounts.new = Coefficient::from_bps(0);
        assert!(config.validate().is_err());

        let config = PricingConfig {
            discount_pre_visit: 0,
            ..PricingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PricingConfig =
            serde_json::from_str(r#"{"discount_min_score": 4, "infancy_boundary": "exclusive"}"#)
                .unwrap();
        assert_eq!(config.discount_min_score, 4);
        assert_eq!(config.infancy_boundary, InfancyBoundary::Exclusive);
        assert_eq!(config.base_rare_coef.bps(), 12000);
        assert_eq!(config.tier_discounts, TierDiscounts::default());
    }
}
