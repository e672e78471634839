//! # Classifiers
//!
//! Pure date classifications the pricing engine branches on.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AgeClassifier                                                          │
//! │    age_in_years(birth, as_of)  → whole years                            │
//! │    is_infant(birth, as_of)     → age ≤ infant_age (default boundary)    │
//! │                                                                         │
//! │  VisitRecencyClassifier                                                 │
//! │    age_in_days(visit, as_of)   → signed day count                       │
//! │    is_old(visit, as_of)        → age_in_days > threshold                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Age Classifier
// =============================================================================

/// Whether a pet exactly at the infancy cutoff age still counts as infant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfancyBoundary {
    /// `age <= infant_age`
    #[default]
    Inclusive,
    /// `age < infant_age`
    Exclusive,
}

/// Decides whether a pet is in its infant life stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeClassifier {
    pub infant_age: u32,
    pub boundary: InfancyBoundary,
}

impl AgeClassifier {
    pub fn new(infant_age: u32, boundary: InfancyBoundary) -> Self {
        AgeClassifier {
            infant_age,
            boundary,
        }
    }

    /// Age in whole years at `as_of`, or `None` if born after `as_of`.
    pub fn age_in_years(birth_date: NaiveDate, as_of: NaiveDate) -> Option<u32> {
        as_of.years_since(birth_date)
    }

    /// True if the pet is an infant on `as_of`.
    ///
    /// `pet` only labels the error for a birth date in the future.
    pub fn is_infant(&self, pet: &str, birth_date: NaiveDate, as_of: NaiveDate) -> CoreResult<bool> {
        let age = Self::age_in_years(birth_date, as_of).ok_or_else(|| CoreError::BirthDateInFuture {
            pet: pet.to_string(),
            birth_date,
            as_of,
        })?;
        Ok(match self.boundary {
            InfancyBoundary::Inclusive => age <= self.infant_age,
            InfancyBoundary::Exclusive => age < self.infant_age,
        })
    }
}

// =============================================================================
// Visit Recency Classifier
// =============================================================================

/// Splits visits into "old" and "new" by age in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitRecencyClassifier {
    pub threshold_days: i64,
}

impl VisitRecencyClassifier {
    pub fn new(threshold_days: i64) -> Self {
        VisitRecencyClassifier { threshold_days }
    }

    /// Days elapsed from `visit_date` to `as_of`. Negative for future visits.
    pub fn age_in_days(visit_date: NaiveDate, as_of: NaiveDate) -> i64 {
        (as_of - visit_date).num_days()
    }

    /// True if the visit is strictly older than the threshold.
    pub fn is_old(&self, visit_date: NaiveDate, as_of: NaiveDate) -> bool {
        Self::age_in_days(visit_date, as_of) > self.threshold_days
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
