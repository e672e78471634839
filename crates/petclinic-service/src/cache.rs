//! # Timed Pet Cache
//!
//! Read-through cache in front of a [`PetRepository`].
//!
//! ```text
//!   get(id) ──► fresh entry? ──yes──► clone
//!                   │ no / expired
//!                   ▼
//!            repository.find_by_id ──► store entry ──► clone
//!
//!   save(pet) ──► repository.save ──► refresh entry
//! ```
//!
//! An entry is fresh while `stored_at.elapsed() < ttl`, so a zero TTL never
//! serves from the cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use petclinic_core::Pet;
use tracing::debug;

use crate::error::ServiceResult;
use crate::repository::PetRepository;

#[derive(Debug, Clone)]
struct Entry {
    pet: Pet,
    stored_at: Instant,
}

impl Entry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// Pets by id with a time-to-live.
pub struct PetTimedCache {
    repository: Arc<dyn PetRepository>,
    ttl: Duration,
    entries: Mutex<HashMap<u32, Entry>>,
}

impl std::fmt::Debug for PetTimedCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PetTimedCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}

impl PetTimedCache {
    pub fn new(repository: Arc<dyn PetRepository>, ttl: Duration) -> Self {
        PetTimedCache {
            repository,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of entries held, fresh or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the pet with this id, loading it on a miss or after expiry.
    pub fn get(&self, id: u32) -> Option<Pet> {
        if let Some(entry) = self.lock().get(&id) {
            if entry.is_fresh(self.ttl) {
                debug!(pet_id = id, "Pet cache hit");
                return Some(entry.pet.clone());
            }
            debug!(pet_id = id, "Pet cache entry expired");
        }

        debug!(pet_id = id, "Pet cache miss");
        let pet = self.repository.find_by_id(id)?;
        self.put(id, pet.clone());
        Some(pet)
    }

    /// Writes the pet through to the repository and refreshes its entry.
    pub fn save(&self, pet: Pet) -> ServiceResult<Pet> {
        let saved = self.repository.save(pet)?;
        if let Some(id) = saved.id {
            self.put(id, saved.clone());
        }
        Ok(saved)
    }

    /// Drops the entry for this id. The next `get` goes to the repository.
    pub fn invalidate(&self, id: u32) {
        if self.lock().remove(&id).is_some() {
            debug!(pet_id = id, "Pet cache entry invalidated");
        }
    }

    fn put(&self, id: u32, pet: Pet) {
        self.lock().insert(
            id,
            Entry {
                pet,
                stored_at: Instant::now(),
            },
        );
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u32, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
