//! # Pet
//!
//! A pet belongs to exactly one [`Owner`](crate::owner::Owner) and carries
//! the birth date and visit history the pricing engine reads.
//!
//! ## Dual-Key Identity
//! - `key`: UUID v4 generated on creation, immutable, used for membership
//!   (contains/remove) while the pet is still unsaved
//! - `id`: persisted identifier, `None` until a repository saves the pet

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::{PetType, Visit};

/// A pet registered at the clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    key: Uuid,

    /// Persisted identifier, `None` while the pet is new.
    pub id: Option<u32>,

    pub name: String,

    pub birth_date: Option<NaiveDate>,

    pub pet_type: Option<PetType>,

    /// Non-owning back-reference to the owning Owner's key.
    owner: Option<Uuid>,

    /// Stored in insertion order; read through [`Pet::visits`].
    visits: Vec<Visit>,
}

impl Pet {
    /// Creates a new, unsaved pet with no owner.
    pub fn new(name: impl Into<String>) -> Self {
        Pet {
            key: Uuid::new_v4(),
            id: None,
            name: name.into(),
            birth_date: None,
            pet_type: None,
            owner: None,
            visits: Vec::new(),
        }
    }

    /// Sets the birth date (builder style).
    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    /// Sets the pet type (builder style).
    pub fn with_type(mut self, pet_type: PetType) -> Self {
        self.pet_type = Some(pet_type);
        self
    }

    /// In-memory identity of this pet.
    #[inline]
    pub fn key(&self) -> Uuid {
        self.key
    }

    /// True until a repository has assigned an id.
    #[inline]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Key of the owning Owner, if the pet has been attached to one.
    #[inline]
    pub fn owner_key(&self) -> Option<Uuid> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Uuid) {
        self.owner = Some(owner);
    }

    /// True if the pet's type is flagged rare. Untyped pets are common.
    pub fn is_rare(&self) -> bool {
        self.pet_type.as_ref().is_some_and(|t| t.is_rare)
    }

    /// Label used in error messages: the name, or the key for unnamed pets.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.key.to_string()
        } else {
            self.name.clone()
        }
    }

    /// Birth date, or [`CoreError::MissingBirthDate`] naming this pet.
    pub fn require_birth_date(&self) -> CoreResult<NaiveDate> {
        self.birth_date.ok_or_else(|| CoreError::MissingBirthDate { pet: self.label() })
    }

    // =========================================================================
    // Visits
    // =========================================================================

    /// Appends a visit to the history.
    pub fn add_visit(&mut self, visit: Visit) {
        self.visits.push(visit);
    }

    /// Number of recorded visits.
    pub fn visit_count(&self) -> usize {
        self.visits.len()
    }

    /// All visits, most recent first. Visits on the same date keep the
    /// order in which they were added.
    pub fn visits(&self) -> Vec<&Visit> {
        let mut sorted: Vec<&Visit> = self.visits.iter().collect();
        // sort_by is stable, which gives the insertion-order tie-break
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Visits recorded before the pet reached `age` years, most recent first.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use petclinic_core::{Pet, Visit};
    ///
    /// let born = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
    /// let mut pet = Pet::new("Leo").with_birth_date(born);
    /// pet.add_visit(Visit::on(NaiveDate::from_ymd_opt(2021, 5, 31).unwrap()));
    /// pet.add_visit(Visit::on(NaiveDate::from_ymd_opt(2021, 6, 1).unwrap()));
    ///
    /// assert_eq!(pet.visits_until_age(1).unwrap().len(), 1);
    /// ```
    pub fn visits_until_age(&self, age: u32) -> CoreResult<Vec<&Visit>> {
        let birth_date = self.require_birth_date()?;
        let cutoff = birth_date.checked_add_months(Months::new(age.saturating_mul(12)));
        Ok(self
            .visits()
            .into_iter()
            .filter(|visit| cutoff.map_or(true, |cutoff| visit.date < cutoff))
            .collect())
    }

    /// Visits dated within `[start, end]`, most recent first.
    pub fn visits_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Visit> {
        self.visits()
            .into_iter()
            .filter(|visit| visit.date >= start && visit.date <= end)
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
