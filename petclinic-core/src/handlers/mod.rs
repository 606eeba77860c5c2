//! Use-case handlers
//!
//! One async function per use case. Each takes the [`Clinic`] plus the
//! already-parsed request parts and returns a [`View`](crate::view::View);
//! none of them touch HTTP types.

pub mod owners;
pub mod pets;
pub mod system;
pub mod vets;
pub mod visits;

use std::sync::Arc;

use crate::model::{Owner, Pet};
use crate::repository::{
    InMemoryClinicStore, OwnerRepository, PetRepository, VetRepository, VisitRepository,
};
use crate::{ClinicError, Result};

/// The repositories a handler may use
#[derive(Clone)]
pub struct Clinic {
    pub owners: Arc<dyn OwnerRepository>,
    pub pets: Arc<dyn PetRepository>,
    pub visits: Arc<dyn VisitRepository>,
    pub vets: Arc<dyn VetRepository>,
}

impl Clinic {
    /// Clinic backed by a fresh in-memory store, with or without demo data
    pub fn in_memory(seed_demo_data: bool) -> Self {
        let store = if seed_demo_data {
            InMemoryClinicStore::with_demo_data()
        } else {
            InMemoryClinicStore::new()
        };
        Self::from_store(Arc::new(store))
    }

    /// Use one store for every repository role
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: OwnerRepository + PetRepository + VisitRepository + VetRepository + 'static,
    {
        Self {
            owners: store.clone(),
            pets: store.clone(),
            visits: store.clone(),
            vets: store,
        }
    }

    pub(crate) async fn owner(&self, owner_id: u32) -> Result<Owner> {
        Ok(self.owners.find_by_id(owner_id).await?)
    }

    /// Owner plus one of their pets; a pet of another owner is not found
    pub(crate) async fn owner_and_pet(&self, owner_id: u32, pet_id: u32) -> Result<(Owner, Pet)> {
        let owner = self.owner(owner_id).await?;
        let pet = owner
            .pet_by_id(pet_id)
            .cloned()
            .ok_or(ClinicError::NotFound { entity: "pet", id: pet_id })?;
        Ok((owner, pet))
    }
}

impl std::fmt::Debug for Clinic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clinic").finish_non_exhaustive()
    }
}
