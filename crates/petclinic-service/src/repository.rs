//! # Repositories
//!
//! Lookup-and-save capabilities for owners and pets.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Repository Pattern                                  │
//! │                                                                         │
//! │  PetManager                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌────────────────────┐      ┌────────────────────┐                    │
//! │  │ OwnerRepository    │      │ PetRepository      │   traits           │
//! │  │ find_by_id / save  │      │ find_by_id / save  │                    │
//! │  └─────────┬──────────┘      └─────────┬──────────┘                    │
//! │            │                           │                                │
//! │            ▼                           ▼                                │
//! │  ┌─────────────────────────────────────────────────┐                   │
//! │  │ InMemoryStore<T>  (RwLock<HashMap<u32, T>>)     │   this module     │
//! │  └─────────────────────────────────────────────────┘                   │
//! │                                                                         │
//! │  Real persistence plugs in behind the same traits.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Id Assignment
//! `save` on an entity with `id == None` assigns the next free id and
//! returns the stored copy. Saving an entity that already has an id
//! overwrites that row. Once id `u32::MAX` is taken, new entities are
//! rejected instead of reusing a row.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use petclinic_core::{Owner, Pet};
use tracing::{debug, warn};

use crate::error::{ServiceError, ServiceResult};

// =============================================================================
// Capabilities
// =============================================================================

/// Owner lookup and persistence.
pub trait OwnerRepository: Send + Sync {
    fn find_by_id(&self, id: u32) -> Option<Owner>;

    /// Stores the owner, assigning an id if it is new.
    fn save(&self, owner: Owner) -> ServiceResult<Owner>;
}

/// Pet lookup and persistence.
pub trait PetRepository: Send + Sync {
    fn find_by_id(&self, id: u32) -> Option<Pet>;

    /// Stores the pet, assigning an id if it is new.
    fn save(&self, pet: Pet) -> ServiceResult<Pet>;
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Something with a persisted `Option<u32>` id.
pub trait Identified: Clone {
    const ENTITY: &'static str;

    fn persisted_id(&self) -> Option<u32>;
    fn assign_id(&mut self, id: u32);
}

impl Identified for Owner {
    const ENTITY: &'static str = "owner";

    fn persisted_id(&self) -> Option<u32> {
        self.id
    }

    fn assign_id(&mut self, id: u32) {
        self.id = Some(id);
    }
}

impl Identified for Pet {
    const ENTITY: &'static str = "pet";

    fn persisted_id(&self) -> Option<u32> {
        self.id
    }

    fn assign_id(&mut self, id: u32) {
        self.id = Some(id);
    }
}

#[derive(Debug)]
struct Rows<T> {
    /// `None` once every id has been handed out.
    next_id: Option<u32>,
    rows: HashMap<u32, T>,
}

/// Thread-safe in-memory table keyed by id.
///
/// Ids start at 1. Reads clone the stored row, so callers never hold the
/// lock across their own work.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    inner: RwLock<Rows<T>>,
}

/// In-memory owner table.
pub type InMemoryOwnerRepository = InMemoryStore<Owner>;

/// In-memory pet table.
pub type InMemoryPetRepository = InMemoryStore<Pet>;

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        InMemoryStore {
            inner: RwLock::new(Rows {
                next_id: Some(1),
                rows: HashMap::new(),
            }),
        }
    }
}

impl<T: Identified> InMemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find(&self, id: u32) -> Option<T> {
        let rows = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let found = rows.rows.get(&id).cloned();
        debug!(entity = T::ENTITY, id, found = found.is_some(), "Lookup by id");
        found
    }

    fn store(&self, mut entity: T) -> ServiceResult<T> {
        let mut rows = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let id = match entity.persisted_id() {
            Some(id) => id,
            None => {
                let id = rows.next_id.ok_or_else(|| {
                    warn!(entity = T::ENTITY, "No ids left to assign");
                    ServiceError::IdSpaceExhausted(T::ENTITY)
                })?;
                entity.assign_id(id);
                id
            }
        };
        // Explicit ids may jump ahead of the counter
        if let Some(next_id) = rows.next_id {
            if id >= next_id {
                rows.next_id = id.checked_add(1);
            }
        }

        rows.rows.insert(id, entity.clone());
        debug!(entity = T::ENTITY, id, "Saved");
        Ok(entity)
    }
}

impl OwnerRepository for InMemoryStore<Owner> {
    fn find_by_id(&self, id: u32) -> Option<Owner> {
        self.find(id)
    }

    fn save(&self, owner: Owner) -> ServiceResult<Owner> {
        self.store(owner)
    }
}

impl PetRepository for InMemoryStore<Pet> {
    fn find_by_id(&self, id: u32) -> Option<Pet> {
        self.find(id)
    }

    fn save(&self, pet: Pet) -> ServiceResult<Pet> {
        self.store(pet)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
