//! What a handler decided to show
//!
//! Handlers return a [`View`]; the server turns it into a response. Pages
//! are rendered by [`html::render`], structured bodies are serialized as-is.

pub mod html;

use serde_json::Value;

use crate::model::{Owner, Pet, PetType, Vets, Visit};
use crate::validation::BindingResult;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Render a server-side page
    Page(Page),
    /// Redirect the browser after a successful write
    Redirect(String),
    /// Machine-readable representation
    Body(Value),
}

impl View {
    pub fn redirect_to_owner(owner_id: u32) -> Self {
        View::Redirect(format!("/owners/{}", owner_id))
    }

    pub fn template(&self) -> Option<&'static str> {
        match self {
            View::Page(page) => Some(page.template()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Welcome,
    FindOwners { last_name: String, result: BindingResult },
    OwnersList { owners: Vec<Owner> },
    OwnerDetails { owner: Owner },
    OwnerForm { owner: Owner, result: BindingResult },
    PetForm { owner: Owner, pet: Pet, types: Vec<PetType>, result: BindingResult },
    VisitForm { owner: Owner, pet: Pet, visit: Visit, result: BindingResult },
    VetList { vets: Vets },
    Error { status: u16, message: String },
}

impl Page {
    /// Template name, shared with the page title and test assertions
    pub fn template(&self) -> &'static str {
        match self {
            Page::Welcome => "welcome",
            Page::FindOwners { .. } => "owners/findOwners",
            Page::OwnersList { .. } => "owners/ownersList",
            Page::OwnerDetails { .. } => "owners/ownerDetails",
            Page::OwnerForm { .. } => "owners/createOrUpdateOwnerForm",
            Page::PetForm { .. } => "pets/createOrUpdatePetForm",
            Page::VisitForm { .. } => "pets/createOrUpdateVisitForm",
            Page::VetList { .. } => "vets/vetList",
            Page::Error { .. } => "error",
        }
    }

    /// Validation errors carried by a form page
    pub fn binding_result(&self) -> Option<&BindingResult> {
        match self {
            Page::FindOwners { result, .. }
            | Page::OwnerForm { result, .. }
            | Page::PetForm { result, .. }
            | Page::VisitForm { result, .. } => Some(result),
            _ => None,
        }
    }
}

/// Representation requested for the vet list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Html,
    Json,
}

impl Representation {
    /// Pick between HTML and JSON from an `Accept` header.
    ///
    /// JSON wins unless `text/html` is listed with a strictly higher quality.
    /// A missing header means JSON.
    pub fn from_accept(accept: Option<&str>) -> Self {
        let Some(accept) = accept else {
            return Representation::Json;
        };

        let mut html_q: Option<f32> = None;
        let mut json_q: Option<f32> = None;
        for item in accept.split(',') {
            let mut parts = item.split(';').map(str::trim);
            let media = parts.next().unwrap_or_default().to_ascii_lowercase();
            let q = parts
                .find_map(|p| p.strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            let slot = match media.as_str() {
                "text/html" | "application/xhtml+xml" => &mut html_q,
                "application/json" | "*/*" | "application/*" => &mut json_q,
                _ => continue,
            };
            *slot = Some(slot.map_or(q, |current| current.max(q)));
        }

        match (html_q, json_q) {
            (Some(html), Some(json)) if html > json => Representation::Html,
            (Some(html), None) if html > 0.0 => Representation::Html,
            _ => Representation::Json,
        }
    }

    /// Present the vet list in this representation
    pub fn vets(self, vets: Vets) -> View {
        match self {
            Representation::Html => View::Page(Page::VetList { vets }),
            Representation::Json => View::Body(vets.to_json()),
        }
    }
}
