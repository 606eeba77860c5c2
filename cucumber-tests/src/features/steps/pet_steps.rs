use cucumber::gherkin::Step;
use cucumber::{then, when};

use super::owner_steps::form_fields;
use crate::features::world::ClinicWorld;

#[when(expr = "I add a pet to owner {int} with:")]
async fn when_add_pet(world: &mut ClinicWorld, owner_id: u32, step: &Step) {
    let fields = form_fields(step);
    world
        .post_form(&format!("/owners/{}/pets/new", owner_id), &fields)
        .await
        .expect("pet creation should complete");
}

#[when(expr = "I book a visit for pet {int} of owner {int} with:")]
async fn when_book_visit(world: &mut ClinicWorld, pet_id: u32, owner_id: u32, step: &Step) {
    let fields = form_fields(step);
    world
        .post_form(&format!("/owners/{}/pets/{}/visits/new", owner_id, pet_id), &fields)
        .await
        .expect("visit creation should complete");
}

#[then(expr = "owner {int} has {int} pet(s) named {string}")]
async fn then_owner_pet_count(world: &mut ClinicWorld, owner_id: u32, count: usize, name: String) {
    world.get(&format!("/owners/{}", owner_id), None).await.expect("owner page should load");
    assert_eq!(world.last.status, 200);
    let cell = format!("<dd>{}</dd>", name);
    assert_eq!(world.last.body.matches(&cell).count(), count, "page: {}", world.last.body);
}
