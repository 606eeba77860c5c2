//! Binding tables for the clinic's forms

use chrono::NaiveDate;

use super::{BindFailure, Binder, FieldBinding};
use crate::model::{Owner, Pet, PetType, Visit, DATE_FORMAT};

/// Identity is taken from the path, never from a submitted body
const IDENTITY_FIELDS: &[&str] = &["id"];

fn parse_date(raw: &str) -> Result<Option<NaiveDate>, BindFailure> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| BindFailure::new("invalid date"))
}

fn owner_first_name(owner: &mut Owner, raw: &str, _: &()) -> Result<(), BindFailure> {
    owner.first_name = raw.to_string();
    Ok(())
}

fn owner_last_name(owner: &mut Owner, raw: &str, _: &()) -> Result<(), BindFailure> {
    owner.last_name = raw.to_string();
    Ok(())
}

fn owner_address(owner: &mut Owner, raw: &str, _: &()) -> Result<(), BindFailure> {
    owner.address = raw.to_string();
    Ok(())
}

fn owner_city(owner: &mut Owner, raw: &str, _: &()) -> Result<(), BindFailure> {
    owner.city = raw.to_string();
    Ok(())
}

fn owner_telephone(owner: &mut Owner, raw: &str, _: &()) -> Result<(), BindFailure> {
    owner.telephone = raw.to_string();
    Ok(())
}

pub static OWNER_BINDER: Binder<Owner, ()> = Binder {
    fields: &[
        FieldBinding { name: "firstName", set: owner_first_name },
        FieldBinding { name: "lastName", set: owner_last_name },
        FieldBinding { name: "address", set: owner_address },
        FieldBinding { name: "city", set: owner_city },
        FieldBinding { name: "telephone", set: owner_telephone },
    ],
    denied: IDENTITY_FIELDS,
};

/// The find-owners form only ever carries the last name
pub static OWNER_SEARCH_BINDER: Binder<Owner, ()> = Binder {
    fields: &[FieldBinding { name: "lastName", set: owner_last_name }],
    denied: IDENTITY_FIELDS,
};

fn pet_name(pet: &mut Pet, raw: &str, _: &Vec<PetType>) -> Result<(), BindFailure> {
    pet.name = raw.to_string();
    Ok(())
}

fn pet_birth_date(pet: &mut Pet, raw: &str, _: &Vec<PetType>) -> Result<(), BindFailure> {
    pet.birth_date = parse_date(raw)?;
    Ok(())
}

// Types are submitted by name and resolved against the loaded reference data
fn pet_type(pet: &mut Pet, raw: &str, types: &Vec<PetType>) -> Result<(), BindFailure> {
    let raw = raw.trim();
    if raw.is_empty() {
        pet.pet_type = None;
        return Ok(());
    }
    let found = types
        .iter()
        .find(|t| t.name == raw)
        .ok_or_else(|| BindFailure::new(format!("type not found: {}", raw)))?;
    pet.pet_type = Some(found.clone());
    Ok(())
}

pub static PET_BINDER: Binder<Pet, Vec<PetType>> = Binder {
    fields: &[
        FieldBinding { name: "name", set: pet_name },
        FieldBinding { name: "birthDate", set: pet_birth_date },
        FieldBinding { name: "type", set: pet_type },
    ],
    denied: IDENTITY_FIELDS,
};

fn visit_date(visit: &mut Visit, raw: &str, _: &()) -> Result<(), BindFailure> {
    visit.date = parse_date(raw)?;
    Ok(())
}

fn visit_description(visit: &mut Visit, raw: &str, _: &()) -> Result<(), BindFailure> {
    visit.description = raw.to_string();
    Ok(())
}

pub static VISIT_BINDER: Binder<Visit, ()> = Binder {
    fields: &[
        FieldBinding { name: "date", set: visit_date },
        FieldBinding { name: "description", set: visit_description },
    ],
    denied: IDENTITY_FIELDS,
};
