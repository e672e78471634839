//! # Pet Manager
//!
//! The service workflow the web layer calls: owner and pet lookup, pet
//! creation and saving, visit windows and service-charge quotes.
//!
//! ## Collaborators
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          PetManager                                     │
//! │                                                                         │
//! │  find_owner / owner_pets / owner_pet_types / quote_service_charge      │
//! │       └──► OwnerRepository                                             │
//! │                                                                         │
//! │  find_pet / save_pet / visits_between                                  │
//! │       └──► PetTimedCache ──► PetRepository                             │
//! │                                                                         │
//! │  quote_service_charge                                                  │
//! │       └──► &dyn PricingStrategy (tiered or simple)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use petclinic_core::{Money, Owner, Pet, PetType, PricingStrategy, UserTier, Visit};
use tracing::{debug, info};

use crate::cache::PetTimedCache;
use crate::config::{ServiceChargeConfig, ServiceConfig};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{OwnerRepository, PetRepository};

/// Owner/pet workflow over injected repositories.
pub struct PetManager {
    owners: Arc<dyn OwnerRepository>,
    pets: PetTimedCache,
    charges: ServiceChargeConfig,
}

impl std::fmt::Debug for PetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PetManager")
            .field("pets", &self.pets)
            .field("charges", &self.charges)
            .finish_non_exhaustive()
    }
}

impl PetManager {
    pub fn new(
        owners: Arc<dyn OwnerRepository>,
        pets: PetTimedCache,
        charges: ServiceChargeConfig,
    ) -> Self {
        PetManager {
            owners,
            pets,
            charges,
        }
    }

    /// Wires the pet cache and quote amounts from a loaded configuration.
    pub fn from_config(
        config: &ServiceConfig,
        owners: Arc<dyn OwnerRepository>,
        pets: Arc<dyn PetRepository>,
    ) -> Self {
        info!(
            ttl_secs = config.cache.ttl_secs,
            base_charge = %config.service_charge.base_charge,
            "Creating pet manager"
        );
        PetManager::new(
            owners,
            PetTimedCache::new(pets, config.cache.ttl()),
            config.service_charge,
        )
    }

    pub fn charges(&self) -> ServiceChargeConfig {
        self.charges
    }

    pub fn pet_cache(&self) -> &PetTimedCache {
        &self.pets
    }

    // =========================================================================
    // Owners
    // =========================================================================

    /// Looks up an owner. Absence is not an error here.
    pub fn find_owner(&self, owner_id: u32) -> Option<Owner> {
        debug!(owner_id, "Finding owner");
        self.owners.find_by_id(owner_id)
    }

    fn require_owner(&self, owner_id: u32) -> ServiceResult<Owner> {
        self.find_owner(owner_id)
            .ok_or(ServiceError::OwnerNotFound(owner_id))
    }

    /// The owner's pets sorted by name.
    pub fn owner_pets(&self, owner_id: u32) -> ServiceResult<Vec<Pet>> {
        let owner = self.require_owner(owner_id)?;
        Ok(owner.pets().into_iter().cloned().collect())
    }

    /// Distinct types across the owner's pets. Untyped pets contribute none.
    pub fn owner_pet_types(&self, owner_id: u32) -> ServiceResult<HashSet<PetType>> {
        let owner = self.require_owner(owner_id)?;
        Ok(owner
            .pets_in_order()
            .iter()
            .filter_map(|pet| pet.pet_type.clone())
            .collect())
    }

    // =========================================================================
    // Pets
    // =========================================================================

    /// Creates an unsaved pet attached to `owner`.
    pub fn new_pet<'o>(&self, owner: &'o mut Owner) -> &'o mut Pet {
        debug!(owner_key = %owner.key(), "Creating new pet");
        owner.new_pet()
    }

    /// Looks up a pet through the cache. Absence is not an error here.
    pub fn find_pet(&self, pet_id: u32) -> Option<Pet> {
        debug!(pet_id, "Finding pet");
        self.pets.get(pet_id)
    }

    /// Attaches `pet` to `owner` and writes it through the cache.
    ///
    /// The owner's copy receives the assigned id. Saving the owner itself is
    /// left to the caller.
    pub fn save_pet(&self, pet: Pet, owner: &mut Owner) -> ServiceResult<Pet> {
        let attached = owner.add_pet(pet);
        let saved = self.pets.save(attached.clone())?;
        attached.id = saved.id;

        debug!(pet_id = ?saved.id, pet_key = %saved.key(), owner_key = %owner.key(), "Saved pet");
        Ok(saved)
    }

    /// Visits of a stored pet dated within `[start, end]`, most recent first.
    pub fn visits_between(
        &self,
        pet_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<Visit>> {
        let pet = self
            .find_pet(pet_id)
            .ok_or(ServiceError::PetNotFound(pet_id))?;
        Ok(pet.visits_between(start, end).into_iter().cloned().collect())
    }

    // =========================================================================
    // Quotes
    // =========================================================================

    /// Prices the owner's pets, in the order they were added, with the
    /// configured service-charge amounts.
    pub fn quote_service_charge(
        &self,
        owner_id: u32,
        strategy: &dyn PricingStrategy,
        tier: UserTier,
    ) -> ServiceResult<Money> {
        let owner = self.require_owner(owner_id)?;
        let total = strategy.compute_price(
            owner.pets_in_order(),
            self.charges.base_charge,
            self.charges.base_price_per_pet,
            tier,
        )?;

        debug!(
            owner_id,
            strategy = strategy.name(),
            tier = %tier,
            pets = owner.pet_count(),
            total = %total,
            "Quoted service charge"
        );
        Ok(total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryOwnerRepository, InMemoryPetRepository};
    use petclinic_core::{CoreError, SimplePriceCalculator};
    use std::time::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Fixture {
        owners: Arc<InMemoryOwnerRepository>,
        pets: Arc<InMemoryPetRepository>,
        manager: PetManager,
    }

    fn fixture() -> Fixture {
        let owners = Arc::new(InMemoryOwnerRepository::new());
        let pets = Arc::new(InMemoryPetRepository::new());
        let manager = PetManager::new(
            owners.clone(),
            PetTimedCache::new(pets.clone(), Duration::from_secs(300)),
            ServiceChargeConfig::default(),
        );
        Fixture {
            owners,
            pets,
            manager,
        }
    }

    /// Owner 1 with three typed, unsaved pets.
    fn stored_owner(fx: &Fixture) -> Owner {
        let mut owner = Owner::new();
        owner.add_pet(Pet::new("pet#0").with_type(PetType::new("type#0")));
        owner.add_pet(Pet::new("pet#1").with_type(PetType::new("type#1")));
        owner.add_pet(Pet::new("pet#2").with_type(PetType::new("type#0")));
        fx.owners.save(owner).unwrap()
    }

    #[test]
    fn test_find_owner() {
        let fx = fixture();
        let owner = stored_owner(&fx);

        assert_eq!(fx.manager.find_owner(1), Some(owner));
        assert_eq!(fx.manager.find_owner(2), None);
    }

    #[test]
    fn test_new_pet_is_attached_to_owner() {
        let fx = fixture();
        let mut owner = Owner::new();

        let key = fx.manager.new_pet(&mut owner).key();

        assert!(owner.contains_pet(key));
        assert_eq!(owner.pet_at(0).unwrap().owner_key(), Some(owner.key()));
    }

    #[test]
    fn test_find_pet_goes_through_cache() {
        let fx = fixture();
        let saved = fx.pets.save(Pet::new("Leo")).unwrap();

        assert_eq!(fx.manager.find_pet(1), Some(saved));
        assert_eq!(fx.manager.pet_cache().len(), 1);
        assert_eq!(fx.manager.find_pet(2), None);
    }

    #[test]
    fn test_save_pet_sets_owner_and_id() {
        let fx = fixture();
        let mut owner = Owner::new();

        let saved = fx.manager.save_pet(Pet::new("Leo"), &mut owner).unwrap();

        assert_eq!(saved.id, Some(1));
        assert_eq!(saved.owner_key(), Some(owner.key()));
        assert_eq!(owner.get_pet("Leo", true).map(|p| p.id), Some(Some(1)));
        assert_eq!(fx.pets.find_by_id(1).unwrap().key(), saved.key());
    }

    #[test]
    fn test_save_pet_twice_does_not_duplicate() {
        let fx = fixture();
        let mut owner = Owner::new();

        let mut saved = fx.manager.save_pet(Pet::new("Leo"), &mut owner).unwrap();
        saved.name = "Leonard".to_string();
        fx.manager.save_pet(saved, &mut owner).unwrap();

        assert_eq!(owner.pet_count(), 1);
        assert_eq!(fx.pets.len(), 1);
        assert_eq!(fx.manager.find_pet(1).unwrap().name, "Leonard");
    }

    #[test]
    fn test_save_pet_without_name() {
        let fx = fixture();
        let mut owner = Owner::new();
        let pet = Pet::new("").with_type(PetType::new("dog"));

        let saved = fx.manager.save_pet(pet, &mut owner).unwrap();

        assert_eq!(owner.pet_count(), 1);
        assert_eq!(owner.pet_at(0).unwrap().id, saved.id);
        let found = fx.manager.find_pet(saved.id.unwrap()).unwrap();
        assert_eq!(found.key(), saved.key());
        assert_eq!(found.pet_type, Some(PetType::new("dog")));
    }

    #[test]
    fn test_owner_pets_sorted_by_name() {
        let fx = fixture();
        let mut owner = Owner::new();
        owner.add_pet(Pet::new("Tom"));
        owner.add_pet(Pet::new("Basil"));
        let id = fx.owners.save(owner).unwrap().id.unwrap();

        let names: Vec<String> = fx
            .manager
            .owner_pets(id)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Basil", "Tom"]);
    }

    #[test]
    fn test_owner_pet_types_are_distinct() {
        let fx = fixture();
        stored_owner(&fx);

        let types = fx.manager.owner_pet_types(1).unwrap();

        assert_eq!(types.len(), 2);
        assert!(types.contains(&PetType::new("type#0")));
        assert!(types.contains(&PetType::new("type#1")));
    }

    #[test]
    fn test_missing_owner_is_reported() {
        let fx = fixture();
        assert!(matches!(fx.manager.owner_pets(9), Err(ServiceError::OwnerNotFound(9))));
        assert!(matches!(
            fx.manager.owner_pet_types(9),
            Err(ServiceError::OwnerNotFound(9))
        ));
        assert!(matches!(
            fx.manager
                .quote_service_charge(9, &SimplePriceCalculator::default(), UserTier::New),
            Err(ServiceError::OwnerNotFound(9))
        ));
    }

    #[test]
    fn test_visits_between() {
        let fx = fixture();
        let mut pet = Pet::new("Leo");
        pet.add_visit(Visit::new(date(2024, 1, 10), "checkup"));
        pet.add_visit(Visit::new(date(2024, 3, 1), "vaccine"));
        pet.add_visit(Visit::new(date(2024, 5, 20), "dental"));
        let id = fx.pets.save(pet).unwrap().id.unwrap();

        let visits = fx
            .manager
            .visits_between(id, date(2024, 1, 10), date(2024, 3, 1))
            .unwrap();
        let descriptions: Vec<&str> = visits.iter().map(|v| v.description.as_str()).collect();
        assert_eq!(descriptions, vec!["vaccine", "checkup"]);

        let all = fx
            .manager
            .visits_between(id, NaiveDate::MIN, NaiveDate::MAX)
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_visits_between_missing_pet() {
        let fx = fixture();
        let result = fx.manager.visits_between(5, NaiveDate::MIN, NaiveDate::MAX);
        assert!(matches!(result, Err(ServiceError::PetNotFound(5))));
    }

    #[test]
    fn test_quote_uses_configured_amounts() {
        let fx = fixture();
        stored_owner(&fx);

        // 15000 + 3 × 20000, no rare types
        let silver = fx
            .manager
            .quote_service_charge(1, &SimplePriceCalculator::default(), UserTier::Silver)
            .unwrap();
        assert_eq!(silver.cents(), 75000);

        let new = fx
            .manager
            .quote_service_charge(1, &SimplePriceCalculator::default(), UserTier::New)
            .unwrap();
        assert_eq!(new.cents(), 71250);
    }

    #[test]
    fn test_quote_propagates_pricing_errors() {
        use petclinic_core::TieredPriceCalculator;

        let fx = fixture();
        stored_owner(&fx); // no birth dates

        let result = fx.manager.quote_service_charge(
            1,
            &TieredPriceCalculator::default(),
            UserTier::Gold,
        );
        assert!(matches!(
            result,
            Err(ServiceError::Core(CoreError::MissingBirthDate { .. }))
        ));
    }
}
