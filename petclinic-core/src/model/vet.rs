//! Veterinarians

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vet {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub specialties: Vec<Specialty>,
}

impl Vet {
    /// Specialties ordered by name
    pub fn sorted_specialties(&self) -> Vec<&Specialty> {
        let mut specialties: Vec<&Specialty> = self.specialties.iter().collect();
        specialties.sort_by(|a, b| a.name.cmp(&b.name));
        specialties
    }

    pub fn nr_of_specialties(&self) -> usize {
        self.specialties.len()
    }
}

/// Wrapper around the vet list so both the page and the structured body
/// share one root element (`vetList`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vets {
    pub vet_list: Vec<Vet>,
}

/// A vet as it appears in the structured body
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VetBody<'a> {
    id: u32,
    first_name: &'a str,
    last_name: &'a str,
    specialties: Vec<&'a Specialty>,
    nr_of_specialties: usize,
}

impl<'a> From<&'a Vet> for VetBody<'a> {
    fn from(vet: &'a Vet) -> Self {
        Self {
            id: vet.id,
            first_name: &vet.first_name,
            last_name: &vet.last_name,
            specialties: vet.sorted_specialties(),
            nr_of_specialties: vet.nr_of_specialties(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VetsBody<'a> {
    vet_list: Vec<VetBody<'a>>,
}

impl Vets {
    /// Structured body, with the derived `nrOfSpecialties` member on each vet
    pub fn to_json(&self) -> serde_json::Value {
        let body = VetsBody { vet_list: self.vet_list.iter().map(VetBody::from).collect() };
        serde_json::to_value(body).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vets_body_shape() {
        let vets = Vets {
            vet_list: vec![Vet {
                id: 3,
                first_name: "Linda".into(),
                last_name: "Douglas".into(),
                specialties: vec![
                    Specialty { id: 2, name: "surgery".into() },
                    Specialty { id: 3, name: "dentistry".into() },
                ],
            }],
        };

        let body = vets.to_json();
        assert_eq!(body["vetList"][0]["firstName"], "Linda");
        assert_eq!(body["vetList"][0]["nrOfSpecialties"], 2);
        assert_eq!(body["vetList"][0]["specialties"][0]["name"], "dentistry");
    }

    #[test]
    fn test_vet_body_extends_vet_serialization() {
        let vet = Vet {
            id: 2,
            first_name: "Helen".into(),
            last_name: "Leary".into(),
            specialties: vec![Specialty { id: 1, name: "radiology".into() }],
        };
        let body = Vets { vet_list: vec![vet.clone()] }.to_json();

        let mut expected = serde_json::to_value(&vet).unwrap();
        expected["nrOfSpecialties"] = serde_json::json!(1);
        assert_eq!(body["vetList"][0], expected);
    }
}
