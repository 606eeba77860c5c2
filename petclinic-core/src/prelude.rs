//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use petclinic_core::prelude::*;
//! ```

// === Server builder ===
pub use crate::app::{ClinicServer, ClinicServerBuilder, RequestInput};
pub use crate::handlers::Clinic;

// === Configuration ===
pub use crate::config::ClinicConfig;
pub use crate::logging::{init_logging, LogFormat, LogLevel, LoggingConfig};

// === Domain ===
pub use crate::model::{Owner, Pet, PetType, Specialty, Vet, Vets, Visit};
pub use crate::repository::{
    InMemoryClinicStore, OwnerRepository, PetRepository, RepositoryError, VetRepository,
    VisitRepository,
};

// === Errors ===
pub use crate::{ClinicError, Result};
