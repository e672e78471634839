//! # Owner Aggregate
//!
//! The owner is the aggregate root for its pets.
//!
//! ## Ownership Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Owner (key: Uuid)                                                     │
//! │  └── pets: Vec<Pet>            owned, insertion order                  │
//! │        └── Pet.owner: Uuid     non-owning back-reference               │
//! │                                                                         │
//! │  add_pet(pet)      → pet.owner = owner.key, append (or replace same key)│
//! │  remove_pet(key)   → take the pet out, None if absent                  │
//! │  get_pet(name, ..) → linear scan, exact match                          │
//! │  pets()            → name-sorted view, storage untouched               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutation goes through `&mut Owner`, so concurrent writers must be
//! serialized by the caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pet::Pet;

/// A pet owner and the pets they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    key: Uuid,

    /// Persisted identifier, `None` until saved.
    pub id: Option<u32>,

    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,

    pets: Vec<Pet>,
}

impl Default for Owner {
    fn default() -> Self {
        Owner::new()
    }
}

impl Owner {
    /// Creates an unsaved owner with no pets.
    pub fn new() -> Self {
        Owner {
            key: Uuid::new_v4(),
            id: None,
            first_name: String::new(),
            last_name: String::new(),
            address: String::new(),
            city: String::new(),
            telephone: String::new(),
            pets: Vec::new(),
        }
    }

    /// In-memory identity of this owner.
    #[inline]
    pub fn key(&self) -> Uuid {
        self.key
    }

    #[inline]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    // =========================================================================
    // Pet Membership
    // =========================================================================

    /// Attaches a pet to this owner.
    ///
    /// Sets the pet's back-reference and appends it. A pet whose key is
    /// already present replaces the stored copy in place, so re-adding never
    /// duplicates. Duplicate names are not rejected here.
    pub fn add_pet(&mut self, mut pet: Pet) -> &mut Pet {
        pet.set_owner(self.key);
        let existing = self.pets.iter().position(|p| p.key() == pet.key());
        let index = match existing {
            Some(index) => {
                self.pets[index] = pet;
                index
            }
            None => {
                self.pets.push(pet);
                self.pets.len() - 1
            }
        };
        &mut self.pets[index]
    }

    /// Creates a new, unsaved pet already attached to this owner.
    pub fn new_pet(&mut self) -> &mut Pet {
        self.add_pet(Pet::new(String::new()))
    }

    /// Removes the pet with the given key. Returns `None` if it is not here.
    pub fn remove_pet(&mut self, key: Uuid) -> Option<Pet> {
        let index = self.pets.iter().position(|p| p.key() == key)?;
        Some(self.pets.remove(index))
    }

    /// True if a pet with this key belongs to the owner.
    pub fn contains_pet(&self, key: Uuid) -> bool {
        self.pets.iter().any(|p| p.key() == key)
    }

    pub fn pet_count(&self) -> usize {
        self.pets.len()
    }

    /// Pet at `index` in insertion order.
    pub fn pet_at(&self, index: usize) -> Option<&Pet> {
        self.pets.get(index)
    }

    /// Pets sorted by name ascending. Stored order is not changed.
    pub fn pets(&self) -> Vec<&Pet> {
        let mut sorted: Vec<&Pet> = self.pets.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    /// Looks a pet up by exact, case-sensitive name.
    ///
    /// With `ignore_new`, pets that have not been saved yet never match.
    ///
    /// ## Example
    /// ```rust
    /// use petclinic_core::{Owner, Pet};
    ///
    /// let mut owner = Owner::new();
    /// owner.add_pet(Pet::new("Leo"));
    ///
    /// assert!(owner.get_pet("Leo", false).is_some());
    /// assert!(owner.get_pet("leo", false).is_none());
    /// assert!(owner.get_pet("Leo", true).is_none()); // not saved yet
    /// ```
    pub fn get_pet(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
        self.pets
            .iter()
            .filter(|p| !(ignore_new && p.is_new()))
            .find(|p| p.name == name)
    }

    /// Mutable lookup by exact name, regardless of saved state.
    pub fn get_pet_mut(&mut self, name: &str) -> Option<&mut Pet> {
        self.pets.iter_mut().find(|p| p.name == name)
    }

    /// Pets in insertion order, the order pricing consumes them in.
    pub fn pets_in_order(&self) -> &[Pet] {
        &self.pets
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Ten pets "pet0".."pet9"; the even ones are saved.
    fn owner_with_mixed_pets() -> Owner {
        let mut owner = Owner::new();
        for i in 0..10u32 {
            let pet = owner.add_pet(Pet::new(format!("pet{}", i)));
            if i % 2 == 0 {
                pet.id = Some(i);
            }
        }
        owner
    }

    #[test]
    fn test_add_pet_sets_back_reference() {
        let mut owner = Owner::new();
        let pet = Pet::new("Leo");
        let key = pet.key();

        owner.add_pet(pet);

        assert!(owner.contains_pet(key));
        assert_eq!(owner.pet_at(0).unwrap().owner_key(), Some(owner.key()));
    }

    #[test]
    fn test_get_pet_ignores_ids_by_default() {
        let owner = owner_with_mixed_pets();
        for i in 0..10 {
            let name = format!("pet{}", i);
            assert_eq!(owner.get_pet(&name, false).unwrap().name, name);
        }
    }

    #[test]
    fn test_get_pet_ignore_new_skips_unsaved() {
        let owner = owner_with_mixed_pets();
        for name in ["pet1", "pet3", "pet5", "pet7", "pet9"] {
            assert!(owner.get_pet(name, true).is_none());
        }
        for name in ["pet0", "pet2", "pet4", "pet6", "pet8"] {
            assert_eq!(owner.get_pet(name, true).unwrap().name, name);
        }
    }

    #[test]
    fn test_get_pet_found_once_id_assigned() {
        let mut owner = Owner::new();
        owner.add_pet(Pet::new("Leo"));
        assert!(owner.get_pet("Leo", true).is_none());

        owner.get_pet_mut("Leo").unwrap().id = Some(7);
        assert_eq!(owner.get_pet("Leo", true).unwrap().id, Some(7));
    }

    #[test]
    fn test_get_pet_is_case_sensitive() {
        let mut owner = Owner::new();
        owner.add_pet(Pet::new("Leo"));
        assert!(owner.get_pet("LEO", false).is_none());
        assert!(owner.get_pet("missing", false).is_none());
    }

    #[test]
    fn test_pets_sorted_by_name_storage_untouched() {
        let mut owner = Owner::new();
        owner.add_pet(Pet::new("Rosy"));
        owner.add_pet(Pet::new("Basil"));
        owner.add_pet(Pet::new("Max"));

        let names: Vec<&str> = owner.pets().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Basil", "Max", "Rosy"]);
        assert_eq!(owner.pet_at(0).unwrap().name, "Rosy");
    }

    #[test]
    fn test_remove_then_add_restores_without_duplicate() {
        let mut owner = Owner::new();
        owner.add_pet(Pet::new("Leo"));
        let key = owner.pet_at(0).unwrap().key();

        let pet = owner.remove_pet(key).unwrap();
        assert!(!owner.contains_pet(key));
        assert!(owner.remove_pet(key).is_none());

        owner.add_pet(pet.clone());
        owner.add_pet(pet);
        assert_eq!(owner.pet_count(), 1);
        assert!(owner.contains_pet(key));
    }

    #[test]
    fn test_duplicate_names_are_allowed() {
        let mut owner = Owner::new();
        owner.add_pet(Pet::new("Leo"));
        owner.add_pet(Pet::new("Leo"));
        assert_eq!(owner.pet_count(), 2);
    }

    #[test]
    fn test_new_pet_is_attached_and_unsaved() {
        let mut owner = Owner::new();
        let owner_key = owner.key();
        let pet = owner.new_pet();
        pet.name = "Fresh".to_string();
        let key = pet.key();

        assert!(owner.contains_pet(key));
        let stored = owner.get_pet("Fresh", false).unwrap();
        assert!(stored.is_new());
        assert_eq!(stored.owner_key(), Some(owner_key));
    }
}
