//! Pet creation and update under an owner

use super::Clinic;
use crate::binding::{Form, PET_BINDER};
use crate::model::{Owner, Pet};
use crate::repository::RepositoryError;
use crate::validation::{codes, BindingResult, PetValidator, Validator};
use crate::view::{Page, View};
use crate::Result;

const DUPLICATE_MESSAGE: &str = "is already in use";

async fn pet_form(clinic: &Clinic, owner: Owner, pet: Pet, result: BindingResult) -> Result<View> {
    let types = clinic.pets.find_pet_types().await?;
    Ok(View::Page(Page::PetForm { owner, pet, types, result }))
}

pub async fn init_creation_form(clinic: &Clinic, owner_id: u32) -> Result<View> {
    let owner = clinic.owner(owner_id).await?;
    let pet = Pet { owner_id: Some(owner_id), ..Default::default() };
    pet_form(clinic, owner, pet, BindingResult::new()).await
}

/// Add a pet. A name already used by one of the owner's saved pets is a
/// `duplicate` error; nothing is stored then.
pub async fn process_creation_form(clinic: &Clinic, owner_id: u32, form: &Form) -> Result<View> {
    let owner = clinic.owner(owner_id).await?;
    let types = clinic.pets.find_pet_types().await?;

    let mut pet = Pet { owner_id: Some(owner_id), ..Default::default() };
    let mut result = BindingResult::new();
    PET_BINDER.bind(&mut pet, form, &types, &mut result);

    if !pet.name.trim().is_empty() && owner.pet(&pet.name, true).is_some() {
        result.reject_value("name", codes::DUPLICATE, DUPLICATE_MESSAGE);
    }
    PetValidator.validate(&pet, &mut result);

    if result.has_errors() {
        return Ok(View::Page(Page::PetForm { owner, pet, types, result }));
    }

    match clinic.pets.save(owner_id, pet.clone()).await {
        Ok(saved) => {
            log::info!("Created pet {:?} for owner {}", saved.id, owner_id);
            Ok(View::redirect_to_owner(owner_id))
        }
        // Lost a race with a concurrent creation of the same name
        Err(RepositoryError::Duplicate { .. }) => {
            result.reject_value("name", codes::DUPLICATE, DUPLICATE_MESSAGE);
            Ok(View::Page(Page::PetForm { owner, pet, types, result }))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn init_update_form(clinic: &Clinic, owner_id: u32, pet_id: u32) -> Result<View> {
    let (owner, pet) = clinic.owner_and_pet(owner_id, pet_id).await?;
    pet_form(clinic, owner, pet, BindingResult::new()).await
}

/// Update a pet's name, birth date and type. Renaming onto another of the
/// owner's pets is a `duplicate` error. Visits are kept.
pub async fn process_update_form(
    clinic: &Clinic,
    owner_id: u32,
    pet_id: u32,
    form: &Form,
) -> Result<View> {
    let (owner, stored) = clinic.owner_and_pet(owner_id, pet_id).await?;
    let types = clinic.pets.find_pet_types().await?;

    let mut pet = Pet {
        id: Some(pet_id),
        owner_id: Some(owner_id),
        pet_type: stored.pet_type.clone(),
        visits: stored.visits.clone(),
        ..Default::default()
    };
    let mut result = BindingResult::new();
    PET_BINDER.bind(&mut pet, form, &types, &mut result);
    if pet.pet_type.is_none() {
        pet.pet_type = stored.pet_type;
    }

    let clash = owner.pet(&pet.name, false).filter(|other| other.id != Some(pet_id));
    if !pet.name.trim().is_empty() && clash.is_some() {
        result.reject_value("name", codes::DUPLICATE, DUPLICATE_MESSAGE);
    }
    PetValidator.validate(&pet, &mut result);

    if result.has_errors() {
        return Ok(View::Page(Page::PetForm { owner, pet, types, result }));
    }

    clinic.pets.save(owner_id, pet).await?;
    log::info!("Updated pet {} of owner {}", pet_id, owner_id);
    Ok(View::redirect_to_owner(owner_id))
}
