//! Reference and demo data loaded into a fresh store

use chrono::NaiveDate;

use crate::model::{Owner, Pet, PetType, Specialty, Vet, Visit};

const PET_TYPES: &[(u32, &str)] =
    &[(1, "cat"), (2, "dog"), (3, "lizard"), (4, "snake"), (5, "bird"), (6, "hamster")];

const SPECIALTIES: &[(u32, &str)] = &[(1, "radiology"), (2, "surgery"), (3, "dentistry")];

// (id, first, last, specialty ids)
const VETS: &[(u32, &str, &str, &[u32])] = &[
    (1, "James", "Carter", &[]),
    (2, "Helen", "Leary", &[1]),
    (3, "Linda", "Douglas", &[2, 3]),
    (4, "Rafael", "Ortega", &[2]),
    (5, "Henry", "Stevens", &[1]),
    (6, "Sharon", "Jenkins", &[]),
];

// (id, first, last, address, city, telephone)
const OWNERS: &[(u32, &str, &str, &str, &str, &str)] = &[
    (1, "George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023"),
    (2, "Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749"),
    (3, "Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763"),
    (4, "Harold", "Davis", "563 Friendly St.", "Windsor", "6085553198"),
    (5, "Peter", "McTavish", "2387 S. Fair Way", "Madison", "6085552765"),
    (6, "Jean", "Coleman", "105 N. Lake St.", "Monona", "6085552654"),
    (7, "Jeff", "Black", "1450 Oak Blvd.", "Monona", "6085555387"),
    (8, "Maria", "Escobito", "345 Maple St.", "Madison", "6085557683"),
    (9, "David", "Schroeder", "2749 Blackhawk Trail", "Madison", "6085559435"),
    (10, "Carlos", "Estaban", "2335 Independence La.", "Waunakee", "6085555487"),
];

// (id, name, birth date, type id, owner id)
const PETS: &[(u32, &str, (i32, u32, u32), u32, u32)] = &[
    (1, "Leo", (2010, 9, 7), 1, 1),
    (2, "Basil", (2012, 8, 6), 6, 2),
    (3, "Rosy", (2011, 4, 17), 2, 3),
    (4, "Jewel", (2010, 3, 7), 2, 3),
    (5, "Iggy", (2010, 11, 30), 3, 4),
    (6, "George", (2010, 1, 20), 4, 5),
    (7, "Samantha", (2012, 9, 4), 1, 6),
    (8, "Max", (2012, 9, 4), 1, 6),
    (9, "Lucky", (2011, 8, 6), 5, 7),
    (10, "Mulligan", (2007, 2, 24), 2, 8),
    (11, "Freddy", (2010, 3, 9), 5, 9),
    (12, "Lucky", (2010, 6, 24), 2, 10),
    (13, "Sly", (2012, 6, 8), 1, 10),
];

// (id, pet id, date, description)
const VISITS: &[(u32, u32, (i32, u32, u32), &str)] = &[
    (1, 7, (2013, 1, 1), "rabies shot"),
    (2, 8, (2013, 1, 2), "rabies shot"),
    (3, 8, (2013, 1, 3), "neutered"),
    (4, 7, (2013, 1, 4), "spayed"),
];

fn date((y, m, d): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

pub fn pet_types() -> Vec<PetType> {
    PET_TYPES.iter().map(|(id, name)| PetType::new(*id, *name)).collect()
}

pub fn vets() -> Vec<Vet> {
    VETS.iter()
        .map(|(id, first, last, specialty_ids)| Vet {
            id: *id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            specialties: SPECIALTIES
                .iter()
                .filter(|(sid, _)| specialty_ids.contains(sid))
                .map(|(sid, name)| Specialty { id: *sid, name: name.to_string() })
                .collect(),
        })
        .collect()
}

/// Demo owners, each with their pets and visits attached
pub fn owners() -> Vec<Owner> {
    let types = pet_types();

    OWNERS
        .iter()
        .map(|(id, first, last, address, city, telephone)| Owner {
            id: Some(*id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            address: address.to_string(),
            city: city.to_string(),
            telephone: telephone.to_string(),
            pets: PETS
                .iter()
                .filter(|pet| pet.4 == *id)
                .map(|(pet_id, name, birth, type_id, owner_id)| Pet {
                    id: Some(*pet_id),
                    name: name.to_string(),
                    birth_date: date(*birth),
                    pet_type: types.iter().find(|t| t.id == *type_id).cloned(),
                    owner_id: Some(*owner_id),
                    visits: VISITS
                        .iter()
                        .filter(|visit| visit.1 == *pet_id)
                        .map(|(visit_id, visit_pet, day, description)| Visit {
                            id: Some(*visit_id),
                            date: date(*day),
                            description: description.to_string(),
                            pet_id: Some(*visit_pet),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_data_is_consistent() {
        let owners = owners();
        assert_eq!(owners.len(), 10);
        assert_eq!(owners.iter().map(|o| o.pets.len()).sum::<usize>(), 13);
        assert_eq!(
            owners.iter().flat_map(|o| &o.pets).map(|p| p.visits.len()).sum::<usize>(),
            4
        );
        assert!(owners.iter().flat_map(|o| &o.pets).all(|p| p.pet_type.is_some()));
    }

    #[test]
    fn test_vet_specialties() {
        let vets = vets();
        let douglas = vets.iter().find(|v| v.last_name == "Douglas").unwrap();
        assert_eq!(douglas.nr_of_specialties(), 2);
        assert_eq!(vets.len(), 6);
    }
}
