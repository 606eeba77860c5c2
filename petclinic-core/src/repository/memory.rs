//! In-memory clinic store
//!
//! Owners are stored as aggregates: an owner record carries its pets, and
//! each pet carries its visits. A secondary `pet id -> owner id` table lets
//! pets and visits be addressed directly.
//!
//! Writes that touch a pet or a visit hold the owning owner's map entry for
//! their whole duration, so checks made against that owner (pet-name
//! uniqueness) cannot race with another write to the same owner.
//!
//! Lock order is always `owners` then `pet_owners`; lookups through
//! `pet_owners` release it before touching `owners`.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use scc::hash_map::Entry;
use scc::HashMap as SccHashMap;

use super::{
    seed, OwnerRepository, PetRepository, RepositoryError, RepositoryResult, VetRepository,
    VisitRepository,
};
use crate::model::{Owner, Pet, PetType, Vet, Visit};

/// Monotonic id allocator
#[derive(Debug)]
struct Sequence {
    next: AtomicU32,
}

impl Sequence {
    fn starting_after(last: u32) -> Self {
        Self { next: AtomicU32::new(last + 1) }
    }

    fn next(&self, entity: &str) -> RepositoryResult<u32> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map_err(|_| RepositoryError::Unavailable(format!("{} id sequence exhausted", entity)))
    }
}

pub struct InMemoryClinicStore {
    owners: SccHashMap<u32, Owner>,
    pet_owners: SccHashMap<u32, u32>,
    pet_types: Vec<PetType>,
    vets: Vec<Vet>,
    owner_ids: Sequence,
    pet_ids: Sequence,
    visit_ids: Sequence,
}

impl InMemoryClinicStore {
    /// Store holding only reference data (pet types and vets)
    pub fn new() -> Self {
        Self::with_owners(Vec::new())
    }

    /// Store holding reference data plus the demo owners, pets and visits
    pub fn with_demo_data() -> Self {
        Self::with_owners(seed::owners())
    }

    fn with_owners(owners: Vec<Owner>) -> Self {
        let last_owner = owners.iter().filter_map(|o| o.id).max().unwrap_or(0);
        let pets = owners.iter().flat_map(|o| o.pets.iter());
        let last_pet = pets.clone().filter_map(|p| p.id).max().unwrap_or(0);
        let last_visit = pets.flat_map(|p| p.visits.iter()).filter_map(|v| v.id).max().unwrap_or(0);

        let store = Self {
            owners: SccHashMap::new(),
            pet_owners: SccHashMap::new(),
            pet_types: seed::pet_types(),
            vets: seed::vets(),
            owner_ids: Sequence::starting_after(last_owner),
            pet_ids: Sequence::starting_after(last_pet),
            visit_ids: Sequence::starting_after(last_visit),
        };

        for owner in owners {
            let Some(owner_id) = owner.id else { continue };
            for pet_id in owner.pets.iter().filter_map(|p| p.id) {
                let _ = store.pet_owners.insert_sync(pet_id, owner_id);
            }
            let _ = store.owners.insert_sync(owner_id, owner);
        }

        log::debug!(
            "In-memory store ready: {} owners, {} pets",
            store.owners.len(),
            store.pet_owners.len()
        );
        store
    }

    /// Snapshot of every owner, ordered by id
    async fn snapshot(&self) -> Vec<Owner> {
        let mut owners = Vec::with_capacity(self.owners.len());
        self.owners
            .retain_async(|_, owner| {
                owners.push(owner.clone());
                true
            })
            .await;
        owners.sort_by_key(|o| o.id);
        owners
    }

    async fn owner_of_pet(&self, pet_id: u32) -> RepositoryResult<u32> {
        self.pet_owners
            .read_async(&pet_id, |_, owner_id| *owner_id)
            .await
            .ok_or(RepositoryError::NotFound { entity: "pet", id: pet_id })
    }
}

impl Default for InMemoryClinicStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OwnerRepository for InMemoryClinicStore {
    async fn find_by_last_name(&self, prefix: &str) -> RepositoryResult<Vec<Owner>> {
        let mut owners = self.snapshot().await;
        owners.retain(|owner| owner.last_name.starts_with(prefix));
        Ok(owners)
    }

    async fn find_by_id(&self, id: u32) -> RepositoryResult<Owner> {
        self.owners
            .read_async(&id, |_, owner| owner.clone())
            .await
            .ok_or(RepositoryError::NotFound { entity: "owner", id })
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Owner>> {
        Ok(self.snapshot().await)
    }

    async fn save(&self, mut owner: Owner) -> RepositoryResult<Owner> {
        match owner.id {
            None => {
                let id = self.owner_ids.next("owner")?;
                owner.id = Some(id);
                owner.pets.clear();
                self.owners
                    .insert_async(id, owner.clone())
                    .await
                    .map_err(|_| RepositoryError::Unavailable(format!("owner id {} reused", id)))?;
                log::debug!("Inserted owner {}", id);
                Ok(owner)
            }
            Some(id) => match self.owners.entry_async(id).await {
                Entry::Occupied(mut entry) => {
                    let stored = entry.get_mut();
                    stored.first_name = owner.first_name;
                    stored.last_name = owner.last_name;
                    stored.address = owner.address;
                    stored.city = owner.city;
                    stored.telephone = owner.telephone;
                    log::debug!("Updated owner {}", id);
                    Ok(stored.clone())
                }
                Entry::Vacant(_) => Err(RepositoryError::NotFound { entity: "owner", id }),
            },
        }
    }
}

#[async_trait]
impl PetRepository for InMemoryClinicStore {
    async fn find_pet_types(&self) -> RepositoryResult<Vec<PetType>> {
        let mut types = self.pet_types.clone();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    async fn find_by_id(&self, id: u32) -> RepositoryResult<Pet> {
        let owner_id = self.owner_of_pet(id).await?;
        self.owners
            .read_async(&owner_id, |_, owner| owner.pet_by_id(id).cloned())
            .await
            .flatten()
            .ok_or(RepositoryError::NotFound { entity: "pet", id })
    }

    async fn save(&self, owner_id: u32, mut pet: Pet) -> RepositoryResult<Pet> {
        let mut entry = match self.owners.entry_async(owner_id).await {
            Entry::Occupied(entry) => entry,
            Entry::Vacant(_) => {
                return Err(RepositoryError::NotFound { entity: "owner", id: owner_id })
            }
        };
        let owner = entry.get_mut();

        match pet.id {
            None => {
                if owner.pet(&pet.name, true).is_some() {
                    return Err(RepositoryError::Duplicate {
                        entity: "pet",
                        field: "name",
                        value: pet.name,
                    });
                }

                let id = self.pet_ids.next("pet")?;
                pet.id = Some(id);
                pet.owner_id = Some(owner_id);
                pet.visits.clear();
                owner.pets.push(pet.clone());
                let _ = self.pet_owners.insert_sync(id, owner_id);
                log::debug!("Inserted pet {} for owner {}", id, owner_id);
                Ok(pet)
            }
            Some(id) => {
                let stored = owner
                    .pet_by_id_mut(id)
                    .ok_or(RepositoryError::NotFound { entity: "pet", id })?;
                stored.name = pet.name;
                stored.birth_date = pet.birth_date;
                stored.pet_type = pet.pet_type;
                log::debug!("Updated pet {} of owner {}", id, owner_id);
                Ok(stored.clone())
            }
        }
    }
}

#[async_trait]
impl VisitRepository for InMemoryClinicStore {
    async fn find_by_pet_id(&self, pet_id: u32) -> RepositoryResult<Vec<Visit>> {
        let pet = PetRepository::find_by_id(self, pet_id).await?;
        Ok(pet.visits)
    }

    async fn save(&self, pet_id: u32, mut visit: Visit) -> RepositoryResult<Visit> {
        let owner_id = self.owner_of_pet(pet_id).await?;
        let mut entry = match self.owners.entry_async(owner_id).await {
            Entry::Occupied(entry) => entry,
            Entry::Vacant(_) => return Err(RepositoryError::NotFound { entity: "pet", id: pet_id }),
        };
        let pet = entry
            .get_mut()
            .pet_by_id_mut(pet_id)
            .ok_or(RepositoryError::NotFound { entity: "pet", id: pet_id })?;

        match visit.id {
            None => {
                let id = self.visit_ids.next("visit")?;
                visit.id = Some(id);
                visit.pet_id = Some(pet_id);
                pet.visits.push(visit.clone());
                log::debug!("Inserted visit {} for pet {}", id, pet_id);
                Ok(visit)
            }
            Some(id) => {
                let stored = pet
                    .visits
                    .iter_mut()
                    .find(|v| v.id == Some(id))
                    .ok_or(RepositoryError::NotFound { entity: "visit", id })?;
                stored.date = visit.date;
                stored.description = visit.description;
                Ok(stored.clone())
            }
        }
    }
}

#[async_trait]
impl VetRepository for InMemoryClinicStore {
    async fn find_all(&self) -> RepositoryResult<Vec<Vet>> {
        Ok(self.vets.clone())
    }
}
