//! # Validation Module
//!
//! Input validation for pricing parameters and configuration values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Config load (petclinic-service)                              │
//! │  └── PricingConfig::validate() once at startup                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: compute_price (petclinic-core)                               │
//! │  ├── THIS MODULE: amount checks on every call                          │
//! │  └── Per-pet preconditions (birth date present, not in future)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use petclinic_core::money::Money;
//! use petclinic_core::validation::validate_amount;
//!
//! assert!(validate_amount("base_charge", Money::from_cents(15000)).is_ok());
//! assert!(validate_amount("base_charge", Money::from_cents(-1)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::{Coefficient, Money};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Amount Validators
// =============================================================================

/// Validates a pricing amount.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free service)
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a count or threshold is strictly positive.
pub fn validate_positive(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates that a value lies within `[min, max]`.
pub fn validate_range(field: &str, value: i64, min: i64, max: i64) -> ValidationResult<()> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }

    Ok(())
}

/// Validates a coefficient.
///
/// ## Rules
/// - Must not be zero (a zero coefficient would erase prices)
pub fn validate_coefficient(field: &str, coefficient: Coefficient) -> ValidationResult<()> {
    if coefficient.is_zero() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
