//! # petclinic-core: Pure Business Logic for the Pet Clinic
//!
//! This crate holds the owner/pet aggregate and the service-charge pricing
//! engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Pet Clinic Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Web / ORM layer (external collaborator)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │      petclinic-service: PetManager, repositories, config        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ petclinic-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ pet/owner │  │ classify  │  │  pricing  │  │   │
//! │  │   │  Visit    │  │   Pet     │  │ AgeClass. │  │  Tiered   │  │   │
//! │  │   │  PetType  │  │   Owner   │  │ Recency   │  │  Simple   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • INJECTED CLOCK           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Leaf types (Visit, PetType, UserTier)
//! - [`pet`] / [`owner`] - The owner/pet aggregate
//! - [`money`] - Money and basis-point coefficients
//! - [`classify`] - Infancy and visit recency
//! - [`config`] - Pricing constants as a validated value
//! - [`pricing`] - The two calculators behind `PricingStrategy`
//! - [`clock`] - Source of "today"
//! - [`error`] / [`validation`] - Typed errors and input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use petclinic_core::{FixedClock, Money, Owner, Pet, PricingConfig, PricingStrategy,
//!     TieredPriceCalculator, UserTier};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let mut owner = Owner::new();
//! owner.add_pet(Pet::new("Rex").with_birth_date(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()));
//!
//! let strategy: Box<dyn PricingStrategy> = Box::new(
//!     TieredPriceCalculator::with_clock(PricingConfig::default(), Arc::new(FixedClock(today)))
//!         .unwrap(),
//! );
//! let price = strategy
//!     .compute_price(owner.pets_in_order(), Money::from_cents(15000), Money::from_cents(20000), UserTier::New)
//!     .unwrap();
//!
//! // One-year-old infant: 20000 × 1.2 × 1.4
//! assert_eq!(price.cents(), 33600);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod classify;
pub mod clock;
pub mod config;
pub mod error;
pub mod money;
pub mod owner;
pub mod pet;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use classify::{AgeClassifier, InfancyBoundary, VisitRecencyClassifier};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{PricingConfig, TierDiscounts};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Coefficient, Money};
pub use owner::Owner;
pub use pet::Pet;
pub use pricing::{PricingStrategy, SimplePriceCalculator, TieredPriceCalculator};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================
// Defaults for `PricingConfig`. The calculators read the config value, never
// these constants directly.

/// Premium for rare pets (1.2x).
pub const BASE_RARE_COEF: Coefficient = Coefficient::from_bps(12000);

/// Extra premium for infant pets in the tiered calculator (1.4x).
pub const RARE_INFANCY_COEF: Coefficient = Coefficient::from_bps(14000);

/// Loyalty score at which the discount transform starts firing.
pub const DISCOUNT_MIN_SCORE: u32 = 10;

/// Running-total multiplier when all early visits are recent.
pub const DISCOUNT_PRE_VISIT: u32 = 2;

/// Visits older than this many days are "old".
pub const OLD_VISIT_THRESH: u32 = 100;

/// Infancy cutoff age in years.
pub const INFANT_AGE: u32 = 1;

/// Reference age in years for the early-visit window of non-infant pets.
pub const ADULT_AGE: u32 = 3;
