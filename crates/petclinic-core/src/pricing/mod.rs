//! # Pricing Module
//!
//! Service-charge calculators for a collection of pets.
//!
//! ## Strategies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PricingStrategy                                    │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │ TieredPriceCalculator        │   │ SimplePriceCalculator        │   │
//! │  │ ───────────────────────────  │   │ ───────────────────────────  │   │
//! │  │ ordered fold over pets       │   │ order-independent sum        │   │
//! │  │ running total + loyalty score│   │ rare premium, rounded once   │   │
//! │  │ infancy premium              │   │ one tier discount at the end │   │
//! │  │ two loyalty transforms       │   │ base charge always included  │   │
//! │  │ empty order → 0              │   │ empty order → base charge    │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  Callers hold `&dyn PricingStrategy` and never the concrete type.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod simple;
pub mod tiered;

pub use simple::SimplePriceCalculator;
pub use tiered::TieredPriceCalculator;

use crate::error::CoreResult;
use crate::money::Money;
use crate::pet::Pet;
use crate::types::UserTier;

/// A way of turning an order of pets into one service charge.
pub trait PricingStrategy: Send + Sync {
    /// Short stable name, used in log fields.
    fn name(&self) -> &'static str;

    /// Computes the charge for `pets`, consumed in slice order.
    ///
    /// Strategies that do not distinguish customers ignore `tier`.
    fn compute_price(
        &self,
        pets: &[Pet],
        base_charge: Money,
        base_price_per_pet: Money,
        tier: UserTier,
    ) -> CoreResult<Money>;
}
