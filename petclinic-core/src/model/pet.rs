//! Pets and their (shared) types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Visit;

/// Kind of animal, e.g. "cat". Many pets reference the same type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PetType {
    pub id: u32,
    pub name: String,
}

impl PetType {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// An animal belonging to one owner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: Option<u32>,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub pet_type: Option<PetType>,
    pub owner_id: Option<u32>,
    #[serde(default)]
    pub visits: Vec<Visit>,
}

impl Pet {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Visits, newest first
    pub fn sorted_visits(&self) -> Vec<&Visit> {
        let mut visits: Vec<&Visit> = self.visits.iter().collect();
        visits.sort_by(|a, b| b.date.cmp(&a.date));
        visits
    }

    pub fn type_name(&self) -> &str {
        self.pet_type.as_ref().map(|t| t.name.as_str()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit_on(day: u32) -> Visit {
        Visit {
            id: Some(day),
            date: NaiveDate::from_ymd_opt(2013, 1, day),
            description: format!("visit {}", day),
            pet_id: Some(7),
        }
    }

    #[test]
    fn test_visits_newest_first() {
        let pet = Pet { visits: vec![visit_on(1), visit_on(4)], ..Default::default() };
        let days: Vec<Option<u32>> = pet.sorted_visits().iter().map(|v| v.id).collect();
        assert_eq!(days, vec![Some(4), Some(1)]);
    }

    #[test]
    fn test_type_serialized_as_type() {
        let pet = Pet {
            name: "Leo".into(),
            pet_type: Some(PetType::new(1, "cat")),
            birth_date: NaiveDate::from_ymd_opt(2010, 9, 7),
            ..Default::default()
        };
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["type"]["name"], "cat");
        assert_eq!(json["birthDate"], "2010-09-07");
    }
}
