//! Persistence collaborator
//!
//! Handlers only ever see these traits. Implementations own every storage
//! detail; the one shipped here is [`InMemoryClinicStore`].
//!
//! Contract shared by every `save`:
//! - an entity without an id is inserted and gets the next id
//! - an entity with an id replaces the stored fields of that record, or
//!   fails with [`RepositoryError::NotFound`] when the id is unknown
//! - each save is a single all-or-nothing write

use async_trait::async_trait;

use crate::model::{Owner, Pet, PetType, Vet, Visit};

pub mod memory;
pub mod seed;

pub use memory::InMemoryClinicStore;

/// Result type for store operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Lookup by id found nothing
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    /// A uniqueness rule enforced by the store was violated
    #[error("{entity} with {field} '{value}' already exists")]
    Duplicate { entity: &'static str, field: &'static str, value: String },

    /// The store cannot serve the request at all
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Owners whose last name starts with `prefix` (case-sensitive), by id.
    /// The empty prefix matches every owner.
    async fn find_by_last_name(&self, prefix: &str) -> RepositoryResult<Vec<Owner>>;

    /// Owner with its pets and their visits
    async fn find_by_id(&self, id: u32) -> RepositoryResult<Owner>;

    async fn find_all(&self) -> RepositoryResult<Vec<Owner>>;

    /// Persist the owner's own fields. Pets are saved through [`PetRepository`].
    async fn save(&self, owner: Owner) -> RepositoryResult<Owner>;
}

#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn find_pet_types(&self) -> RepositoryResult<Vec<PetType>>;

    async fn find_by_id(&self, id: u32) -> RepositoryResult<Pet>;

    /// Save a pet under `owner_id`.
    ///
    /// A new pet whose name matches (ignoring case) a pet the owner already
    /// has is rejected with [`RepositoryError::Duplicate`].
    async fn save(&self, owner_id: u32, pet: Pet) -> RepositoryResult<Pet>;
}

#[async_trait]
pub trait VisitRepository: Send + Sync {
    async fn find_by_pet_id(&self, pet_id: u32) -> RepositoryResult<Vec<Visit>>;

    async fn save(&self, pet_id: u32, visit: Visit) -> RepositoryResult<Visit>;
}

#[async_trait]
pub trait VetRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Vet>>;
}
