//! # Domain Types
//!
//! Leaf value types shared by the aggregate and the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Visit       │   │    PetType      │   │    UserTier     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (optional)  │   │  id (optional)  │   │  New            │       │
//! │  │  description    │   │  name           │   │  Silver         │       │
//! │  │  date           │   │  is_rare        │   │  Gold           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Pet and Owner (the aggregate) live in their own modules.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is the persisted identifier assigned by a repository. `None` means
//! the value has never been saved.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Visit
// =============================================================================

/// A single visit of a pet to the clinic.
///
/// Visits are created once and then only read. The date carries no time
/// component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    /// Persisted identifier, `None` until saved.
    pub id: Option<u32>,

    /// Free-text reason for the visit.
    pub description: String,

    /// Calendar date of the visit.
    pub date: NaiveDate,
}

impl Visit {
    /// Creates an unsaved visit on the given date.
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Visit {
            id: None,
            description: description.into(),
            date,
        }
    }

    /// Creates an unsaved visit with an empty description.
    pub fn on(date: NaiveDate) -> Self {
        Visit::new(date, String::new())
    }
}

// =============================================================================
// Pet Type
// =============================================================================

/// Species/breed classification shared by many pets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PetType {
    pub id: Option<u32>,
    pub name: String,
    /// Rare types carry a price premium in the per-user calculator.
    #[serde(default)]
    pub is_rare: bool,
}

impl PetType {
    /// Creates a common (non-rare) pet type.
    pub fn new(name: impl Into<String>) -> Self {
        PetType {
            id: None,
            name: name.into(),
            is_rare: false,
        }
    }

    /// Creates a rare pet type.
    pub fn rare(name: impl Into<String>) -> Self {
        PetType {
            is_rare: true,
            ..PetType::new(name)
        }
    }
}

// =============================================================================
// User Tier
// =============================================================================

/// Customer tier used by the per-user calculator.
///
/// Only [`UserTier::New`] receives a discount; the rates of the other tiers
/// are configured but not applied by the current rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserTier {
    /// First-time customer.
    New,
    /// Returning customer.
    #[default]
    Silver,
    /// Long-standing customer.
    Gold,
}

impl UserTier {
    /// Returns true if the end-of-computation discount applies to this tier.
    pub fn is_discounted(&self) -> bool {
        matches!(self, UserTier::New)
    }
}

impl std::fmt::Display for UserTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserTier::New => write!(f, "new"),
            UserTier::Silver => write!(f, "silver"),
            UserTier::Gold => write!(f, "gold"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
