//! # Service Error Types
//!
//! Errors surfaced by the service workflow and configuration loading.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (pricing, validation)     io / toml errors (config file)    │
//! │       │                                     │                           │
//! │       └──────────────┬──────────────────────┘                           │
//! │                      ▼                                                  │
//! │            ServiceError (this module)                                   │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │        Web layer maps to a user-facing response                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use petclinic_core::CoreError;
use thiserror::Error;

/// Service-level errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No owner is stored under this id.
    #[error("Owner not found: {0}")]
    OwnerNotFound(u32),

    /// No pet is stored under this id.
    #[error("Pet not found: {0}")]
    PetNotFound(u32),

    /// Every id for this entity kind has been assigned.
    #[error("No {0} ids left to assign")]
    IdSpaceExhausted(&'static str),

    /// Pricing or validation failure from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration could not be loaded or saved.
    ///
    /// ## When This Occurs
    /// - No platform config directory and no explicit path
    /// - A settings value is out of range after env overrides
    #[error("Config load failed: {0}")]
    ConfigLoadFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl From<petclinic_core::ValidationError> for ServiceError {
    fn from(err: petclinic_core::ValidationError) -> Self {
        ServiceError::Core(CoreError::Validation(err))
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
