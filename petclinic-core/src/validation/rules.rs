//! Per-form business rules

use super::{codes, BindingResult};
use crate::model::{Owner, Pet, Visit};

const REQUIRED_MESSAGE: &str = "must not be empty";
const TELEPHONE_DIGITS: usize = 10;

/// Checks a bound object and records problems in `result`.
///
/// Fields that already carry a binding error are left alone so the user
/// sees the conversion problem, not a second "required" message.
pub trait Validator<T> {
    fn validate(&self, target: &T, result: &mut BindingResult);
}

fn require_text(result: &mut BindingResult, field: &'static str, value: &str) {
    if !result.has_field_errors(field) && value.trim().is_empty() {
        result.reject_value(field, codes::REQUIRED, REQUIRED_MESSAGE);
    }
}

fn require_present<T>(result: &mut BindingResult, field: &'static str, value: &Option<T>) {
    if !result.has_field_errors(field) && value.is_none() {
        result.reject_value(field, codes::REQUIRED, "is required");
    }
}

pub struct OwnerValidator;

impl Validator<Owner> for OwnerValidator {
    fn validate(&self, owner: &Owner, result: &mut BindingResult) {
        require_text(result, "firstName", &owner.first_name);
        require_text(result, "lastName", &owner.last_name);
        require_text(result, "address", &owner.address);
        require_text(result, "city", &owner.city);
        require_text(result, "telephone", &owner.telephone);

        // Surrounding blanks count as non-digits
        let phone = owner.telephone.as_str();
        if !result.has_field_errors("telephone")
            && (phone.len() > TELEPHONE_DIGITS || !phone.chars().all(|c| c.is_ascii_digit()))
        {
            result.reject_value(
                "telephone",
                codes::DIGITS,
                format!(
                    "numeric value out of bounds (<{} digits>.<0 digits> expected)",
                    TELEPHONE_DIGITS
                ),
            );
        }
    }
}

pub struct PetValidator;

impl Validator<Pet> for PetValidator {
    fn validate(&self, pet: &Pet, result: &mut BindingResult) {
        require_text(result, "name", &pet.name);

        // Type is only mandatory when the pet is created
        if pet.is_new() {
            require_present(result, "type", &pet.pet_type);
        }

        require_present(result, "birthDate", &pet.birth_date);
    }
}

pub struct VisitValidator;

impl Validator<Visit> for VisitValidator {
    fn validate(&self, visit: &Visit, result: &mut BindingResult) {
        require_present(result, "date", &visit.date);
        require_text(result, "description", &visit.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PetType;
    use chrono::NaiveDate;

    fn george() -> Owner {
        Owner {
            first_name: "George".into(),
            last_name: "Franklin".into(),
            address: "110 W. Liberty St.".into(),
            city: "Madison".into(),
            telephone: "6085551023".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_owner_passes() {
        let mut result = BindingResult::new();
        OwnerValidator.validate(&george(), &mut result);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_owner_requires_every_field() {
        let mut result = BindingResult::new();
        OwnerValidator.validate(&Owner::default(), &mut result);
        for field in ["firstName", "lastName", "address", "city", "telephone"] {
            assert_eq!(result.field_error(field).unwrap().code, codes::REQUIRED, "{}", field);
        }
        assert_eq!(result.error_count(), 5);
    }

    #[test]
    fn test_telephone_must_be_ten_digits_at_most() {
        for bad in ["608-555-1023", "60855510234", "phone", " 6085550001 "] {
            let mut owner = george();
            owner.telephone = bad.into();
            let mut result = BindingResult::new();
            OwnerValidator.validate(&owner, &mut result);
            assert_eq!(result.field_error("telephone").unwrap().code, codes::DIGITS, "{}", bad);
        }
    }

    #[test]
    fn test_new_pet_needs_type_existing_pet_does_not() {
        let mut pet = Pet {
            name: "Leo".into(),
            birth_date: NaiveDate::from_ymd_opt(2010, 9, 7),
            ..Default::default()
        };
        let mut result = BindingResult::new();
        PetValidator.validate(&pet, &mut result);
        assert_eq!(result.field_error("type").unwrap().code, codes::REQUIRED);

        pet.id = Some(1);
        let mut result = BindingResult::new();
        PetValidator.validate(&pet, &mut result);
        assert!(!result.has_errors());

        pet.pet_type = Some(PetType::new(1, "cat"));
        pet.birth_date = None;
        let mut result = BindingResult::new();
        PetValidator.validate(&pet, &mut result);
        assert!(result.has_field_errors("birthDate"));
    }

    #[test]
    fn test_binding_error_is_not_doubled() {
        let mut result = BindingResult::new();
        result.reject_raw("date", codes::TYPE_MISMATCH, "invalid date", "yesterday");
        let visit = Visit { date: None, description: "checkup".into(), ..Default::default() };
        VisitValidator.validate(&visit, &mut result);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.field_error("date").unwrap().code, codes::TYPE_MISMATCH);
    }
}
