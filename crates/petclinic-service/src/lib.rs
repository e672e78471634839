//! # petclinic-service: Service Workflow for the Pet Clinic
//!
//! Wraps the pure `petclinic-core` crate with state: repositories, a timed
//! pet cache, the `PetManager` workflow and configuration loading.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pet Clinic Data Flow                             │
//! │                                                                         │
//! │  Web controller (quote for owner 7, tier New)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                petclinic-service (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  PetManager   │───►│ Repositories  │    │ ServiceConfig│  │   │
//! │  │   │ (manager.rs)  │    │ PetTimedCache │    │ (config.rs)  │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │       petclinic-core: Owner/Pet aggregate, PricingStrategy      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use petclinic_core::{Owner, Pet, SimplePriceCalculator, UserTier};
//! use petclinic_service::{
//!     InMemoryOwnerRepository, InMemoryPetRepository, OwnerRepository, PetManager, ServiceConfig,
//! };
//!
//! let owners = Arc::new(InMemoryOwnerRepository::new());
//! let manager = PetManager::from_config(
//!     &ServiceConfig::default(),
//!     owners.clone(),
//!     Arc::new(InMemoryPetRepository::new()),
//! );
//!
//! let mut owner = Owner::new();
//! manager.save_pet(Pet::new("Leo"), &mut owner).unwrap();
//! let owner_id = owners.save(owner).unwrap().id.unwrap();
//!
//! let quote = manager
//!     .quote_service_charge(owner_id, &SimplePriceCalculator::default(), UserTier::Silver)
//!     .unwrap();
//! assert_eq!(quote.cents(), 35000);
//! ```
//!
//! No tracing subscriber is installed here; binaries choose their own.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod config;
pub mod error;
pub mod manager;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use cache::PetTimedCache;
pub use config::{CacheConfig, ServiceChargeConfig, ServiceConfig};
pub use error::{ServiceError, ServiceResult};
pub use manager::PetManager;
pub use repository::{
    InMemoryOwnerRepository, InMemoryPetRepository, InMemoryStore, OwnerRepository, PetRepository,
};
