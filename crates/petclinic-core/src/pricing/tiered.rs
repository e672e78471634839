//! # Tiered Price Calculator
//!
//! The loyalty-scored calculator. Pets are folded in order through two
//! accumulators that live only for one call.
//!
//! ## Per-Pet Step
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pet ──► infant?  (birth date vs. today)                                │
//! │           │                                                             │
//! │           ├─► unit = per_pet × 1.2 (× 1.4 if infant)                    │
//! │           │                                                             │
//! │           └─► early = visits before age 1 (infant) or 3 (adult)         │
//! │                 │                                                       │
//! │                 ├── empty ──────────────────────────────┐               │
//! │                 │                                       │               │
//! │                 └── score += 2 (infant) / 1 (adult)     │               │
//! │                       │                                 │               │
//! │                       ├── score < 10 ───────────────────┤               │
//! │                       │                                 │               │
//! │                       └── score ≥ 10:                   │               │
//! │                             all new: total × 2 + base   │               │
//! │                             any old: (total + base) ×   │               │
//! │                               (max_days / 100 + count)  │               │
//! │                                                         ▼               │
//! │                                              total += unit              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The score never resets inside a call, so once it reaches the minimum
//! every further pet with early visits applies its transform again.

use std::sync::Arc;

use crate::classify::VisitRecencyClassifier;
use crate::clock::{Clock, SystemClock};
use crate::config::PricingConfig;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pet::Pet;
use crate::pricing::PricingStrategy;
use crate::types::{UserTier, Visit};
use crate::validation::validate_amount;

/// Accumulators threaded through one `compute_price` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RunState {
    running_total: Money,
    loyalty_score: u32,
}

/// Calculator that treats every pet as rare and rewards orders with many
/// visited pets.
#[derive(Clone)]
pub struct TieredPriceCalculator {
    config: PricingConfig,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TieredPriceCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TieredPriceCalculator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for TieredPriceCalculator {
    fn default() -> Self {
        TieredPriceCalculator {
            config: PricingConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl TieredPriceCalculator {
    /// Creates a calculator reading the system date.
    pub fn new(config: PricingConfig) -> CoreResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a calculator with an injected clock.
    pub fn with_clock(config: PricingConfig, clock: Arc<dyn Clock>) -> CoreResult<Self> {
        config.validate()?;
        Ok(TieredPriceCalculator { config, clock })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Computes the charge for `pets` in order.
    ///
    /// An empty order costs exactly zero.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use chrono::NaiveDate;
    /// use petclinic_core::{FixedClock, Money, Pet, PricingConfig, TieredPriceCalculator};
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    /// let calc = TieredPriceCalculator::with_clock(
    ///     PricingConfig::default(),
    ///     Arc::new(FixedClock(today)),
    /// ).unwrap();
    ///
    /// let adult = Pet::new("Rex").with_birth_date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    /// let price = calc
    ///     .compute_price(&[adult], Money::from_cents(15000), Money::from_cents(20000))
    ///     .unwrap();
    /// assert_eq!(price.cents(), 24000);
    /// ```
    pub fn compute_price(
        &self,
        pets: &[Pet],
        base_charge: Money,
        base_price_per_pet: Money,
    ) -> CoreResult<Money> {
        validate_amount("base_charge", base_charge)?;
        validate_amount("base_price_per_pet", base_price_per_pet)?;

        let today = self.clock.today();
        let state = pets.iter().try_fold(RunState::default(), |state, pet| {
            self.price_pet(state, pet, base_charge, base_price_per_pet, today)
        })?;

        Ok(state.running_total)
    }

    /// One step of the fold.
    fn price_pet(
        &self,
        state: RunState,
        pet: &Pet,
        base_charge: Money,
        base_price_per_pet: Money,
        today: chrono::NaiveDate,
    ) -> CoreResult<RunState> {
        let label = pet.label();
        let overflow = || CoreError::AmountOverflow {
            stage: format!("pricing pet {}", label),
        };

        let birth_date = pet.require_birth_date()?;
        let infant = self
            .config
            .age_classifier()
            .is_infant(&label, birth_date, today)?;

        let unit_price = if infant {
            base_price_per_pet.checked_scale(
                1,
                &[self.config.base_rare_coef, self.config.rare_infancy_coef],
            )
        } else {
            base_price_per_pet.checked_apply(self.config.base_rare_coef)
        }
        .ok_or_else(overflow)?;

        let reference_age = if infant {
            self.config.infant_age
        } else {
            self.config.adult_age
        };
        let early_visits = pet.visits_until_age(reference_age)?;

        let RunState {
            mut running_total,
            mut loyalty_score,
        } = state;

        if !early_visits.is_empty() {
            loyalty_score = loyalty_score.saturating_add(if infant { 2 } else { 1 });
            if loyalty_score >= self.config.discount_min_score {
                running_total = self
                    .apply_loyalty_transform(running_total, &early_visits, base_charge, today)
                    .ok_or_else(overflow)?;
            }
        }

        running_total = running_total.checked_add(unit_price).ok_or_else(overflow)?;

        Ok(RunState {
            running_total,
            loyalty_score,
        })
    }

    /// Re-bases the running total once the loyalty score has been reached.
    ///
    /// Returns `None` on overflow. `early_visits` is never empty here.
    fn apply_loyalty_transform(
        &self,
        running_total: Money,
        early_visits: &[&Visit],
        base_charge: Money,
        today: chrono::NaiveDate,
    ) -> Option<Money> {
        let recency = self.config.recency_classifier();
        let has_old_visit = early_visits.iter().any(|v| recency.is_old(v.date, today));

        if !has_old_visit {
            return running_total
                .checked_mul(self.config.discount_pre_visit as i64)?
                .checked_add(base_charge);
        }

        let max_age_days = early_visits
            .iter()
            .map(|v| VisitRecencyClassifier::age_in_days(v.date, today))
            .max()?;
        // max_age_days > threshold > 0 on this branch, so division floors
        let factor = max_age_days / recency.threshold_days + early_visits.len() as i64;

        running_total.checked_add(base_charge)?.checked_mul(factor)
    }
}

impl PricingStrategy for TieredPriceCalculator {
    fn name(&self) -> &'static str {
        "tiered"
    }

    fn compute_price(
        &self,
        pets: &[Pet],
        base_charge: Money,
        base_price_per_pet: Money,
        _tier: UserTier,
    ) -> CoreResult<Money> {
        TieredPriceCalculator::compute_price(self, pets, base_charge, base_price_per_pet)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
