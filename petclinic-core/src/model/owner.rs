//! Clinic customer

use serde::{Deserialize, Serialize};

use super::Pet;

/// A clinic customer who has pets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: Option<u32>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

impl Owner {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// "First Last" as shown on the details page
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Pets ordered by name
    pub fn sorted_pets(&self) -> Vec<&Pet> {
        let mut pets: Vec<&Pet> = self.pets.iter().collect();
        pets.sort_by(|a, b| a.name.cmp(&b.name));
        pets
    }

    /// Look up a pet by name, ignoring case.
    ///
    /// With `ignore_new` set, pets that have not been saved yet are skipped.
    pub fn pet(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
        let wanted = name.to_lowercase();
        self.pets
            .iter()
            .filter(|pet| !(ignore_new && pet.is_new()))
            .find(|pet| pet.name.to_lowercase() == wanted)
    }

    pub fn pet_by_id(&self, id: u32) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.id == Some(id))
    }

    pub fn pet_by_id_mut(&mut self, id: u32) -> Option<&mut Pet> {
        self.pets.iter_mut().find(|pet| pet.id == Some(id))
    }
}
