//! End-to-end owner/pet workflow against in-memory repositories.

use std::sync::Arc;

use chrono::{Days, Months, NaiveDate};
use petclinic_core::{
    FixedClock, Owner, Pet, PetType, PricingStrategy, SimplePriceCalculator,
    TieredPriceCalculator, UserTier, Visit,
};
use petclinic_service::{
    InMemoryOwnerRepository, InMemoryPetRepository, OwnerRepository, PetManager, ServiceConfig,
    ServiceError,
};
use tracing_subscriber::EnvFilter;

/// Honors `RUST_LOG`; later calls are no-ops.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

struct Clinic {
    owners: Arc<InMemoryOwnerRepository>,
    manager: PetManager,
}

fn clinic(config: &ServiceConfig) -> Clinic {
    init_tracing();
    let owners = Arc::new(InMemoryOwnerRepository::new());
    let manager = PetManager::from_config(
        config,
        owners.clone(),
        Arc::new(InMemoryPetRepository::new()),
    );
    Clinic { owners, manager }
}

/// Three-year-old pet with three visits 99 days ago.
fn regular(name: &str) -> Pet {
    let mut pet = Pet::new(name)
        .with_birth_date(today().checked_sub_months(Months::new(36)).unwrap())
        .with_type(PetType::new("dog"));
    for _ in 0..3 {
        pet.add_visit(Visit::new(today() - Days::new(99), "checkup"));
    }
    pet
}

#[test]
fn register_pets_then_quote_both_strategies() {
    let clinic = clinic(&ServiceConfig::default());
    let mut owner = Owner::new();
    owner.last_name = "Davis".to_string();

    for i in 0..10 {
        clinic
            .manager
            .save_pet(regular(&format!("pet#{i}")), &mut owner)
            .unwrap();
    }
    assert!(owner.pets_in_order().iter().all(|p| !p.is_new()));
    let owner_id = clinic.owners.save(owner).unwrap().id.unwrap();

    let tiered = TieredPriceCalculator::with_clock(
        ServiceConfig::default().pricing,
        Arc::new(FixedClock(today())),
    )
    .unwrap();
    let simple = SimplePriceCalculator::default();

    // Nine pets at 20000 × 1.2, then the tenth reaches the loyalty score
    let tiered_quote = clinic
        .manager
        .quote_service_charge(owner_id, &tiered, UserTier::Gold)
        .unwrap();
    assert_eq!(tiered_quote.cents(), 9 * 24000 * 2 + 15000 + 24000);

    let simple_quote = clinic
        .manager
        .quote_service_charge(owner_id, &simple, UserTier::New)
        .unwrap();
    assert_eq!(simple_quote.cents(), (15000 + 10 * 20000) * 95 / 100);

    let strategies: [&dyn PricingStrategy; 2] = [&tiered, &simple];
    let names: Vec<&str> = strategies.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["tiered", "simple"]);
}

#[test]
fn saved_pets_are_found_by_id_and_name() {
    let clinic = clinic(&ServiceConfig::default());
    let mut owner = Owner::new();

    let draft_key = clinic.manager.new_pet(&mut owner).key();
    assert!(owner.get_pet("", true).is_none());

    let saved = clinic.manager.save_pet(regular("Leo"), &mut owner).unwrap();
    let found = clinic.manager.find_pet(saved.id.unwrap()).unwrap();
    assert_eq!(found.key(), saved.key());
    assert_eq!(found.owner_key(), Some(owner.key()));

    assert!(owner.get_pet("Leo", true).is_some());
    assert!(owner.contains_pet(draft_key));
    assert_eq!(owner.pet_count(), 2);
}

#[test]
fn visits_window_and_types_for_stored_owner() {
    let clinic = clinic(&ServiceConfig::default());
    let mut owner = Owner::new();

    let mut cat = Pet::new("Tom").with_type(PetType::rare("sphynx"));
    cat.add_visit(Visit::new(today() - Days::new(10), "vaccine"));
    cat.add_visit(Visit::new(today() - Days::new(400), "first checkup"));
    let cat_id = clinic.manager.save_pet(cat, &mut owner).unwrap().id.unwrap();
    clinic.manager.save_pet(regular("Rex"), &mut owner).unwrap();
    let owner_id = clinic.owners.save(owner).unwrap().id.unwrap();

    let recent = clinic
        .manager
        .visits_between(cat_id, today() - Days::new(30), today())
        .unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].description, "vaccine");

    let types = clinic.manager.owner_pet_types(owner_id).unwrap();
    assert!(types.contains(&PetType::rare("sphynx")));
    assert!(types.contains(&PetType::new("dog")));

    let names: Vec<String> = clinic
        .manager
        .owner_pets(owner_id)
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Rex", "Tom"]);
}

#[test]
fn quote_uses_amounts_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("petclinic.toml");
    std::fs::write(
        &path,
        "[service_charge]\nbase_charge_cents = 1000\nbase_price_per_pet_cents = 500\n",
    )
    .unwrap();
    let config = ServiceConfig::load(Some(path)).unwrap();

    let clinic = clinic(&config);
    let mut owner = Owner::new();
    clinic
        .manager
        .save_pet(Pet::new("Nemo").with_type(PetType::rare("axolotl")), &mut owner)
        .unwrap();
    let owner_id = clinic.owners.save(owner).unwrap().id.unwrap();

    let quote = clinic
        .manager
        .quote_service_charge(owner_id, &SimplePriceCalculator::default(), UserTier::Silver)
        .unwrap();
    assert_eq!(quote.cents(), 1000 + 600);
}

#[test]
fn unknown_ids_are_reported() {
    let clinic = clinic(&ServiceConfig::default());
    assert!(clinic.manager.find_owner(1).is_none());
    assert!(clinic.manager.find_pet(1).is_none());
    assert!(matches!(
        clinic.manager.owner_pets(1),
        Err(ServiceError::OwnerNotFound(1))
    ));
    assert!(matches!(
        clinic.manager.visits_between(1, today(), today()),
        Err(ServiceError::PetNotFound(1))
    ));
}
