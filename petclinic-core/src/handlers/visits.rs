//! Recording visits for a pet

use super::Clinic;
use crate::binding::{Form, VISIT_BINDER};
use crate::model::Visit;
use crate::validation::{BindingResult, Validator, VisitValidator};
use crate::view::{Page, View};
use crate::Result;

pub async fn init_new_visit_form(clinic: &Clinic, owner_id: u32, pet_id: u32) -> Result<View> {
    let (owner, pet) = clinic.owner_and_pet(owner_id, pet_id).await?;
    let visit = Visit { pet_id: Some(pet_id), ..Default::default() };
    Ok(View::Page(Page::VisitForm { owner, pet, visit, result: BindingResult::new() }))
}

pub async fn process_new_visit_form(
    clinic: &Clinic,
    owner_id: u32,
    pet_id: u32,
    form: &Form,
) -> Result<View> {
    let (owner, pet) = clinic.owner_and_pet(owner_id, pet_id).await?;

    let mut visit = Visit { pet_id: Some(pet_id), ..Default::default() };
    let mut result = BindingResult::new();
    VISIT_BINDER.bind(&mut visit, form, &(), &mut result);
    VisitValidator.validate(&visit, &mut result);

    if result.has_errors() {
        return Ok(View::Page(Page::VisitForm { owner, pet, visit, result }));
    }

    let saved = clinic.visits.save(pet_id, visit).await?;
    log::info!("Recorded visit {:?} for pet {}", saved.id, pet_id);
    Ok(View::redirect_to_owner(owner_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::codes;

    #[tokio::test]
    async fn test_new_visit_defaults_to_today() {
        let clinic = Clinic::in_memory(true);
        match init_new_visit_form(&clinic, 1, 1).await.unwrap() {
            View::Page(Page::VisitForm { visit, .. }) => {
                assert_eq!(visit.date, Some(chrono::Local::now().date_naive()));
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_visit_is_recorded() {
        let clinic = Clinic::in_memory(true);
        let form = Form::parse("date=2024-05-01&description=annual+checkup").unwrap();
        let view = process_new_visit_form(&clinic, 1, 1, &form).await.unwrap();
        assert_eq!(view, View::Redirect("/owners/1".into()));

        let visits = clinic.visits.find_by_pet_id(1).await.unwrap();
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].description, "annual checkup");
    }

    #[tokio::test]
    async fn test_missing_description_rerenders_form() {
        let clinic = Clinic::in_memory(true);
        let form = Form::parse("date=2024-05-01&description=").unwrap();
        match process_new_visit_form(&clinic, 1, 1, &form).await.unwrap() {
            View::Page(Page::VisitForm { result, .. }) => {
                assert_eq!(result.field_error("description").unwrap().code, codes::REQUIRED);
            }
            other => panic!("unexpected view {:?}", other),
        }
        assert!(clinic.visits.find_by_pet_id(1).await.unwrap().is_empty());
    }
}
