//! # Simple Price Calculator
//!
//! Flat per-pet pricing with a rare premium and a single discount for new
//! customers, applied after everything else has been summed.

use crate::config::PricingConfig;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pet::Pet;
use crate::pricing::PricingStrategy;
use crate::types::UserTier;
use crate::validation::validate_amount;

/// Stateless, order-independent calculator keyed by customer tier.
#[derive(Debug, Clone, Default)]
pub struct SimplePriceCalculator {
    config: PricingConfig,
}

impl SimplePriceCalculator {
    pub fn new(config: PricingConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(SimplePriceCalculator { config })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// `base_charge + Σ pet prices`, then the tier discount for new users.
    ///
    /// ## Example
    /// ```rust
    /// use petclinic_core::{Money, Pet, PetType, SimplePriceCalculator, UserTier};
    ///
    /// let calc = SimplePriceCalculator::default();
    /// let pets = [Pet::new("Nemo").with_type(PetType::rare("axolotl"))];
    ///
    /// let price = calc
    ///     .compute_price(&pets, Money::from_cents(20000), Money::from_cents(10000), UserTier::Silver)
    ///     .unwrap();
    /// assert_eq!(price.cents(), 32000);
    /// ```
    pub fn compute_price(
        &self,
        pets: &[Pet],
        base_charge: Money,
        base_price_per_pet: Money,
        tier: UserTier,
    ) -> CoreResult<Money> {
        validate_amount("base_charge", base_charge)?;
        validate_amount("base_price_per_pet", base_price_per_pet)?;

        let overflow = |stage: &str| CoreError::AmountOverflow {
            stage: stage.to_string(),
        };

        let rare_count = pets.iter().filter(|pet| pet.is_rare()).count() as i64;
        let common_count = pets.len() as i64 - rare_count;

        // Σ bpp × coef over rare pets is one exact product, rounded once
        let rare_total = base_price_per_pet
            .checked_scale(rare_count, &[self.config.base_rare_coef])
            .ok_or_else(|| overflow("pricing rare pets"))?;
        let common_total = base_price_per_pet
            .checked_mul(common_count)
            .ok_or_else(|| overflow("pricing common pets"))?;

        let mut total = base_charge
            .checked_add(rare_total)
            .and_then(|sum| sum.checked_add(common_total))
            .ok_or_else(|| overflow("summing pet prices"))?;

        if tier.is_discounted() {
            total = total
                .checked_apply(self.config.tier_discounts.rate(tier))
                .ok_or_else(|| CoreError::AmountOverflow {
                    stage: format!("applying {} tier discount", tier),
                })?;
        }

        Ok(total)
    }
}

impl PricingStrategy for SimplePriceCalculator {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn compute_price(
        &self,
        pets: &[Pet],
        base_charge: Money,
        base_price_per_pet: Money,
        tier: UserTier,
    ) -> CoreResult<Money> {
        SimplePriceCalculator::compute_price(self, pets, base_charge, base_price_per_pet, tier)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
