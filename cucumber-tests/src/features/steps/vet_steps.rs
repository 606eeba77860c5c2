use cucumber::{then, when};

use crate::features::world::ClinicWorld;

#[when(expr = "I request {string} accepting {string}")]
async fn when_request_accepting(world: &mut ClinicWorld, path: String, accept: String) {
    world.get(&path, Some(&accept)).await.expect("GET should complete");
}

#[then(expr = "the response is JSON with {int} vets")]
async fn then_json_vets(world: &mut ClinicWorld, count: usize) {
    let content_type = world.last.content_type.clone().unwrap_or_default();
    assert!(content_type.starts_with("application/json"), "content type {}", content_type);

    let body = world.body_json().expect("JSON body");
    let vets = body["vetList"].as_array().expect("vetList array");
    assert_eq!(vets.len(), count);
}

#[then(expr = "vet {string} has {int} specialties")]
async fn then_vet_specialties(world: &mut ClinicWorld, last_name: String, count: u64) {
    let body = world.body_json().expect("JSON body");
    let vet = body["vetList"]
        .as_array()
        .and_then(|vets| vets.iter().find(|vet| vet["lastName"] == last_name.as_str()))
        .unwrap_or_else(|| panic!("vet {} not listed", last_name));
    assert_eq!(vet["nrOfSpecialties"], count);
}

#[then(expr = "the response is an HTML page")]
async fn then_html(world: &mut ClinicWorld) {
    let content_type = world.last.content_type.clone().unwrap_or_default();
    assert!(content_type.starts_with("text/html"), "content type {}", content_type);
}
