//! Owner search, details, creation and update

use super::Clinic;
use crate::binding::{Form, OWNER_BINDER, OWNER_SEARCH_BINDER};
use crate::model::Owner;
use crate::validation::{codes, BindingResult, OwnerValidator, Validator};
use crate::view::{Page, View};
use crate::Result;

pub async fn init_find_form(_clinic: &Clinic) -> Result<View> {
    Ok(View::Page(Page::FindOwners { last_name: String::new(), result: BindingResult::new() }))
}

/// Search owners by last-name prefix.
///
/// An absent filter matches everyone. No match re-renders the search form
/// with a `notFound` error on `lastName`, a single match redirects to that
/// owner, several matches show the list in store order.
pub async fn process_find_form(clinic: &Clinic, query: &Form) -> Result<View> {
    let mut probe = Owner::default();
    let mut result = BindingResult::new();
    OWNER_SEARCH_BINDER.bind(&mut probe, query, &(), &mut result);
    let last_name = probe.last_name;

    let mut owners = clinic.owners.find_by_last_name(&last_name).await?;
    log::debug!("Owner search '{}' matched {}", last_name, owners.len());

    match owners.len() {
        0 => {
            result.reject_value("lastName", codes::NOT_FOUND, "has not been found");
            Ok(View::Page(Page::FindOwners { last_name, result }))
        }
        1 => {
            let owner = owners.remove(0);
            match owner.id {
                Some(id) => Ok(View::redirect_to_owner(id)),
                None => Err(crate::ClinicError::Internal("stored owner without id".into())),
            }
        }
        _ => Ok(View::Page(Page::OwnersList { owners })),
    }
}

pub async fn show_owner(clinic: &Clinic, owner_id: u32) -> Result<View> {
    let owner = clinic.owner(owner_id).await?;
    Ok(View::Page(Page::OwnerDetails { owner }))
}

pub async fn init_creation_form(_clinic: &Clinic) -> Result<View> {
    Ok(View::Page(Page::OwnerForm { owner: Owner::default(), result: BindingResult::new() }))
}

pub async fn process_creation_form(clinic: &Clinic, form: &Form) -> Result<View> {
    let mut owner = Owner::default();
    let mut result = BindingResult::new();
    OWNER_BINDER.bind(&mut owner, form, &(), &mut result);
    OwnerValidator.validate(&owner, &mut result);

    if result.has_errors() {
        return Ok(View::Page(Page::OwnerForm { owner, result }));
    }

    let saved = clinic.owners.save(owner).await?;
    let id = saved
        .id
        .ok_or_else(|| crate::ClinicError::Internal("store returned owner without id".into()))?;
    log::info!("Created owner {}", id);
    Ok(View::redirect_to_owner(id))
}

pub async fn init_update_form(clinic: &Clinic, owner_id: u32) -> Result<View> {
    let owner = clinic.owner(owner_id).await?;
    Ok(View::Page(Page::OwnerForm { owner, result: BindingResult::new() }))
}

/// Update an owner's own fields. Invalid input is shown back as submitted;
/// the stored record stays untouched.
pub async fn process_update_form(clinic: &Clinic, owner_id: u32, form: &Form) -> Result<View> {
    let stored = clinic.owner(owner_id).await?;

    let mut owner = Owner { id: Some(owner_id), pets: stored.pets, ..Default::default() };
    let mut result = BindingResult::new();
    OWNER_BINDER.bind(&mut owner, form, &(), &mut result);
    OwnerValidator.validate(&owner, &mut result);

    if result.has_errors() {
        return Ok(View::Page(Page::OwnerForm { owner, result }));
    }

    clinic.owners.save(owner).await?;
    log::info!("Updated owner {}", owner_id);
    Ok(View::redirect_to_owner(owner_id))
}
