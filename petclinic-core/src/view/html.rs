//! Minimal server-side HTML renderer
//!
//! Every piece of user-supplied text goes through [`escape`].

use std::fmt::Write;

use super::Page;
use crate::model::{Owner, Pet, PetType, Vets, Visit, DATE_FORMAT};
use crate::validation::BindingResult;

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(page: &Page) -> String {
    let body = match page {
        Page::Welcome => "<h2>Welcome</h2>\n<p>Find owners, register pets and record visits.</p>\n".to_string(),
        Page::FindOwners { last_name, result } => find_owners(last_name, result),
        Page::OwnersList { owners } => owners_list(owners),
        Page::OwnerDetails { owner } => owner_details(owner),
        Page::OwnerForm { owner, result } => owner_form(owner, result),
        Page::PetForm { owner, pet, types, result } => pet_form(owner, pet, types, result),
        Page::VisitForm { owner, pet, visit, result } => visit_form(owner, pet, visit, result),
        Page::VetList { vets } => vet_list(vets),
        Page::Error { status, message } => format!(
            "<h2>Something happened...</h2>\n<p class=\"status\">{}</p>\n<p>{}</p>\n",
            status,
            escape(message)
        ),
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>PetClinic :: {}</title>\n</head>\n<body data-template=\"{}\">\n<nav><a href=\"/\">Home</a> <a href=\"/owners/find\">Find owners</a> <a href=\"/vets.html\">Veterinarians</a></nav>\n{}</body>\n</html>\n",
        page.template(),
        page.template(),
        body
    )
}

fn date_text(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default()
}

/// One labelled input. A field with a binding error shows what was typed.
fn input(out: &mut String, label: &str, name: &str, kind: &str, bound: &str, result: &BindingResult) {
    let value = result.rejected_value(name).unwrap_or(bound);
    let _ = write!(
        out,
        "<div class=\"field\"><label for=\"{name}\">{label}</label><input type=\"{kind}\" id=\"{name}\" name=\"{name}\" value=\"{}\">",
        escape(value)
    );
    field_error(out, name, result);
    out.push_str("</div>\n");
}

fn field_error(out: &mut String, name: &str, result: &BindingResult) {
    if let Some(error) = result.field_error(name) {
        let _ = write!(
            out,
            "<span class=\"error\" data-code=\"{}\">{}</span>",
            error.code,
            escape(&error.message)
        );
    }
}

fn find_owners(last_name: &str, result: &BindingResult) -> String {
    let mut out = String::from("<h2>Find Owners</h2>\n<form action=\"/owners\" method=\"get\">\n");
    input(&mut out, "Last name", "lastName", "text", last_name, result);
    out.push_str("<button type=\"submit\">Find Owner</button>\n</form>\n<a href=\"/owners/new\">Add Owner</a>\n");
    out
}

fn owners_list(owners: &[Owner]) -> String {
    let mut out = String::from(
        "<h2>Owners</h2>\n<table id=\"owners\">\n<tr><th>Name</th><th>Address</th><th>City</th><th>Telephone</th><th>Pets</th></tr>\n",
    );
    for owner in owners {
        let pets: Vec<String> = owner.sorted_pets().iter().map(|p| escape(&p.name)).collect();
        let _ = writeln!(
            out,
            "<tr><td><a href=\"/owners/{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            owner.id.unwrap_or_default(),
            escape(&owner.full_name()),
            escape(&owner.address),
            escape(&owner.city),
            escape(&owner.telephone),
            pets.join(" ")
        );
    }
    out.push_str("</table>\n");
    out
}

fn owner_details(owner: &Owner) -> String {
    let id = owner.id.unwrap_or_default();
    let mut out = String::new();
    let _ = write!(
        out,
        "<h2>Owner Information</h2>\n<table class=\"owner\">\n<tr><th>Name</th><td>{}</td></tr>\n<tr><th>Address</th><td>{}</td></tr>\n<tr><th>City</th><td>{}</td></tr>\n<tr><th>Telephone</th><td>{}</td></tr>\n</table>\n<a href=\"/owners/{id}/edit\">Edit Owner</a> <a href=\"/owners/{id}/pets/new\">Add New Pet</a>\n<h2>Pets and Visits</h2>\n",
        escape(&owner.full_name()),
        escape(&owner.address),
        escape(&owner.city),
        escape(&owner.telephone),
    );

    for pet in owner.sorted_pets() {
        let pet_id = pet.id.unwrap_or_default();
        let _ = write!(
            out,
            "<div class=\"pet\"><dl><dt>Name</dt><dd>{}</dd><dt>Birth Date</dt><dd>{}</dd><dt>Type</dt><dd>{}</dd></dl>\n<table class=\"visits\"><tr><th>Visit Date</th><th>Description</th></tr>\n",
            escape(&pet.name),
            date_text(pet.birth_date),
            escape(pet.type_name())
        );
        for visit in pet.sorted_visits() {
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td>{}</td></tr>",
                date_text(visit.date),
                escape(&visit.description)
            );
        }
        let _ = writeln!(
            out,
            "</table>\n<a href=\"/owners/{id}/pets/{pet_id}/edit\">Edit Pet</a> <a href=\"/owners/{id}/pets/{pet_id}/visits/new\">Add Visit</a></div>"
        );
    }
    out
}

fn owner_form(owner: &Owner, result: &BindingResult) -> String {
    let (title, action) = match owner.id {
        Some(id) => ("Owner", format!("/owners/{}/edit", id)),
        None => ("New Owner", "/owners/new".to_string()),
    };
    let mut out = format!("<h2>{}</h2>\n<form id=\"add-owner-form\" method=\"post\" action=\"{}\">\n", title, action);
    input(&mut out, "First Name", "firstName", "text", &owner.first_name, result);
    input(&mut out, "Last Name", "lastName", "text", &owner.last_name, result);
    input(&mut out, "Address", "address", "text", &owner.address, result);
    input(&mut out, "City", "city", "text", &owner.city, result);
    input(&mut out, "Telephone", "telephone", "text", &owner.telephone, result);
    let button = if owner.is_new() { "Add Owner" } else { "Update Owner" };
    let _ = writeln!(out, "<button type=\"submit\">{}</button>\n</form>", button);
    out
}

fn pet_form(owner: &Owner, pet: &Pet, types: &[PetType], result: &BindingResult) -> String {
    let owner_id = owner.id.unwrap_or_default();
    let action = match pet.id {
        Some(pet_id) => format!("/owners/{}/pets/{}/edit", owner_id, pet_id),
        None => format!("/owners/{}/pets/new", owner_id),
    };
    let title = if pet.is_new() { "New Pet" } else { "Pet" };
    let mut out = format!(
        "<h2>{}</h2>\n<form method=\"post\" action=\"{}\">\n<div class=\"field\"><label>Owner</label><span>{}</span></div>\n",
        title,
        action,
        escape(&owner.full_name())
    );
    input(&mut out, "Name", "name", "text", &pet.name, result);
    input(&mut out, "Birth Date", "birthDate", "date", &date_text(pet.birth_date), result);

    let selected = result.rejected_value("type").unwrap_or(pet.type_name());
    out.push_str("<div class=\"field\"><label for=\"type\">Type</label><select id=\"type\" name=\"type\">\n");
    for pet_type in types {
        let mark = if pet_type.name == selected { " selected" } else { "" };
        let _ = writeln!(
            out,
            "<option value=\"{0}\"{1}>{0}</option>",
            escape(&pet_type.name),
            mark
        );
    }
    out.push_str("</select>");
    field_error(&mut out, "type", result);
    out.push_str("</div>\n");

    let button = if pet.is_new() { "Add Pet" } else { "Update Pet" };
    let _ = writeln!(out, "<button type=\"submit\">{}</button>\n</form>", button);
    out
}

fn visit_form(owner: &Owner, pet: &Pet, visit: &Visit, result: &BindingResult) -> String {
    let mut out = format!(
        "<h2>New Visit</h2>\n<table class=\"pet\"><tr><th>Name</th><th>Birth Date</th><th>Type</th><th>Owner</th></tr>\n<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr></table>\n<form method=\"post\" action=\"/owners/{}/pets/{}/visits/new\">\n",
        escape(&pet.name),
        date_text(pet.birth_date),
        escape(pet.type_name()),
        escape(&owner.full_name()),
        owner.id.unwrap_or_default(),
        pet.id.unwrap_or_default()
    );
    input(&mut out, "Date", "date", "date", &date_text(visit.date), result);
    input(&mut out, "Description", "description", "text", &visit.description, result);
    out.push_str("<button type=\"submit\">Add Visit</button>\n</form>\n<h3>Previous Visits</h3>\n<table class=\"visits\"><tr><th>Date</th><th>Description</th></tr>\n");
    for previous in pet.sorted_visits() {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td></tr>",
            date_text(previous.date),
            escape(&previous.description)
        );
    }
    out.push_str("</table>\n");
    out
}

fn vet_list(vets: &Vets) -> String {
    let mut out = String::from("<h2>Veterinarians</h2>\n<table id=\"vets\">\n<tr><th>Name</th><th>Specialties</th></tr>\n");
    for vet in &vets.vet_list {
        let specialties: Vec<String> =
            vet.sorted_specialties().iter().map(|s| escape(&s.name)).collect();
        let specialties = if specialties.is_empty() { "none".to_string() } else { specialties.join(" ") };
        let _ = writeln!(
            out,
            "<tr><td>{} {}</td><td>{}</td></tr>",
            escape(&vet.first_name),
            escape(&vet.last_name),
            specialties
        );
    }
    out.push_str("</table>\n");
    out
}
