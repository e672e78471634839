//! # Error Types
//!
//! Domain-specific error types for petclinic-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  petclinic-core errors (this file)                                     │
//! │  ├── CoreError        - Pricing preconditions, aggregate rules         │
//! │  └── ValidationError  - Field and config validation failures           │
//! │                                                                         │
//! │  petclinic-service errors (separate crate)                             │
//! │  └── ServiceError     - Lookups, config loading                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Pet-scoped errors name the offending pet
//! 3. Errors are enum variants, never String
//! 4. "Not found" is `Option::None`, never an error variant here

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Pricing is total over well-formed input, so every variant here is a
/// precondition violation the caller has to fix before asking again.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A pet has no birth date, so it cannot be classified by age.
    ///
    /// ## When This Occurs
    /// - A pet created through `Owner::new_pet` was priced before the
    ///   birth date was filled in
    #[error("Pet {pet} has no birth date")]
    MissingBirthDate { pet: String },

    /// A pet's birth date lies after the pricing date.
    #[error("Pet {pet} has birth date {birth_date} after {as_of}")]
    BirthDateInFuture {
        pet: String,
        birth_date: NaiveDate,
        as_of: NaiveDate,
    },

    /// The running total left the representable money range.
    ///
    /// `stage` names the step, e.g. "pricing pet Leo".
    #[error("Price overflow while {stage}")]
    AmountOverflow { stage: String },

    /// Pricing parameters are inconsistent.
    #[error("Invalid pricing configuration: {0}")]
    InvalidConfig(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
