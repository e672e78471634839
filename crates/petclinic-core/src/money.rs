//! # Money Module
//!
//! Provides the `Money` type for monetary values and the `Coefficient` type
//! for the fractional multipliers used by the pricing rules.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    20000 × 1.2 × 1.4 = 33599.999999999996  ❌ WRONG!                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units + basis-point coefficients           │
//! │    20000 × 12000 × 14000 / 10000² = 33600                               │
//! │    Chained coefficients multiply exactly, then round once,              │
//! │    half away from zero                                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use petclinic_core::money::{Coefficient, Money};
//!
//! let per_pet = Money::from_cents(20000);
//! let rare = Coefficient::from_bps(12000); // 1.2x
//!
//! let price = per_pet.checked_apply(rare).unwrap();
//! assert_eq!(price.cents(), 24000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Basis points in one whole unit (10000 bps = 1.0x).
pub const BPS_SCALE: u32 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: matches the arithmetic of the pricing rules, which
///   never go negative for valid input but must not silently wrap
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Checked operations**: the loyalty fold multiplies the running total
///   repeatedly, so the pricing code uses the `checked_*` family
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use petclinic_core::money::Money;
    ///
    /// let charge = Money::from_cents(15000);
    /// assert_eq!(charge.cents(), 15000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Multiplies by an integer factor, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use petclinic_core::money::Money;
    ///
    /// let total = Money::from_cents(216000);
    /// assert_eq!(total.checked_mul(2).unwrap().cents(), 432000);
    /// assert!(Money::from_cents(i64::MAX).checked_mul(2).is_none());
    /// ```
    #[inline]
    pub const fn checked_mul(self, factor: i64) -> Option<Money> {
        match self.0.checked_mul(factor) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Scales the amount by a coefficient, rounding half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use petclinic_core::money::{Coefficient, Money};
    ///
    /// let base = Money::from_cents(24000);
    /// let infant = Coefficient::from_bps(14000); // 1.4x
    /// assert_eq!(base.checked_apply(infant).unwrap().cents(), 33600);
    ///
    /// // 0.95 × 1001 = 950.95 → 951
    /// let new_user = Coefficient::from_bps(9500);
    /// assert_eq!(Money::from_cents(1001).checked_apply(new_user).unwrap().cents(), 951);
    /// ```
    pub fn checked_apply(self, coefficient: Coefficient) -> Option<Money> {
        self.checked_scale(1, &[coefficient])
    }

    /// Computes `amount × factor × c1 × c2 × …` exactly and rounds once.
    ///
    /// ## Implementation
    /// Integer math in i128: the numerator collects `amount × factor × bps…`
    /// and the denominator `10000^n`. Half the denominator is added (or
    /// subtracted for negatives) before the single division.
    ///
    /// ## Example
    /// ```rust
    /// use petclinic_core::money::{Coefficient, Money};
    ///
    /// let rare = Coefficient::from_bps(12000);
    /// let infant = Coefficient::from_bps(14000);
    ///
    /// // 3 × 1.2 × 1.4 = 5.04 → 5
    /// assert_eq!(Money::from_cents(3).checked_scale(1, &[rare, infant]).unwrap().cents(), 5);
    /// // 10 × 1 × 1.2 = 12
    /// assert_eq!(Money::from_cents(1).checked_scale(10, &[rare]).unwrap().cents(), 12);
    /// ```
    pub fn checked_scale(self, factor: i64, coefficients: &[Coefficient]) -> Option<Money> {
        let mut numerator = (self.0 as i128).checked_mul(factor as i128)?;
        let mut denominator: i128 = 1;
        for coefficient in coefficients {
            numerator = numerator.checked_mul(coefficient.bps() as i128)?;
            denominator = denominator.checked_mul(BPS_SCALE as i128)?;
        }

        let half = denominator / 2;
        let rounded = if numerator >= 0 {
            numerator.checked_add(half)? / denominator
        } else {
            numerator.checked_sub(half)? / denominator
        };
        i64::try_from(rounded).ok().map(Money)
    }
}

/// Display shows the amount as `units.minor` for debugging and log fields.
///
/// ## Note
/// Currency symbols and localization belong to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Coefficient
// =============================================================================

/// A multiplicative coefficient in basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 0.0001x
/// 12000 bps = 1.2x (rare premium), 9500 bps = 0.95x (new-user discount)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coefficient(u32);

impl Coefficient {
    /// The neutral coefficient (1.0x).
    pub const ONE: Coefficient = Coefficient(BPS_SCALE);

    /// Creates a coefficient from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Coefficient(bps)
    }

    /// Creates a coefficient from a ratio (for convenience in config and tests).
    pub fn from_ratio(ratio: f64) -> Self {
        Coefficient((ratio * BPS_SCALE as f64).round().max(0.0) as u32)
    }

    /// Returns the coefficient in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the coefficient as a ratio (for display only).
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.0 as f64 / BPS_SCALE as f64
    }

    /// Checks if the coefficient is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Coefficient {
    fn default() -> Self {
        Coefficient::ONE
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.ratio())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
