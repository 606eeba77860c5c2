//! Clinic domain model
//!
//! Owners own pets, pets own visits. Pet types and vets are reference data.
//! Ids are assigned by the store on first save; `None` means "not yet
//! persisted".

pub mod owner;
pub mod pet;
pub mod vet;
pub mod visit;

pub use owner::Owner;
pub use pet::{Pet, PetType};
pub use vet::{Specialty, Vet, Vets};
pub use visit::Visit;

/// Textual date format used by forms and the JSON body
pub const DATE_FORMAT: &str = "%Y-%m-%d";
