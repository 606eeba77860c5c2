use cucumber::gherkin::Step;
use cucumber::{given, then, when};

use crate::features::world::ClinicWorld;

/// Pairs from a two-column `| field | value |` table
pub(crate) fn form_fields(step: &Step) -> Vec<(String, String)> {
    step.table
        .as_ref()
        .map(|table| {
            table
                .rows
                .iter()
                .filter(|row| row.len() >= 2)
                .map(|row| (row[0].clone(), row[1].clone()))
                .collect()
        })
        .unwrap_or_default()
}

#[given(expr = "a clinic with the demo data")]
async fn given_demo_clinic(world: &mut ClinicWorld) {
    world.start_server(true).await.expect("clinic server should start");
}

#[given(expr = "an empty clinic")]
async fn given_empty_clinic(world: &mut ClinicWorld) {
    world.start_server(false).await.expect("clinic server should start");
}

#[when(expr = "I open {string}")]
async fn when_open(world: &mut ClinicWorld, path: String) {
    world.get(&path, None).await.expect("GET should complete");
}

#[when(expr = "I search owners by last name {string}")]
async fn when_search_owners(world: &mut ClinicWorld, last_name: String) {
    let query = last_name.replace(' ', "+");
    world.get(&format!("/owners?lastName={}", query), None).await.expect("search should complete");
}

#[when(expr = "I submit the form at {string} with:")]
async fn when_submit_form(world: &mut ClinicWorld, path: String, step: &Step) {
    let fields = form_fields(step);
    world.post_form(&path, &fields).await.expect("POST should complete");
}

#[when(expr = "I follow the redirect")]
async fn when_follow_redirect(world: &mut ClinicWorld) {
    world.follow_redirect().await.expect("redirect should be followed");
}

#[then(expr = "the response status is {int}")]
async fn then_status(world: &mut ClinicWorld, status: u16) {
    assert_eq!(world.last.status, status, "body: {}", world.last.body);
}

#[then(expr = "I am redirected to {string}")]
async fn then_redirected(world: &mut ClinicWorld, location: String) {
    assert_eq!(world.last.status, 302);
    assert_eq!(world.last.location.as_deref(), Some(location.as_str()));
}

#[then(expr = "the page shows the {string} template")]
async fn then_template(world: &mut ClinicWorld, template: String) {
    let marker = format!("data-template=\"{}\"", template);
    assert!(world.last.body.contains(&marker), "expected {} in {}", marker, world.last.body);
}

#[then(expr = "the page contains {string}")]
async fn then_contains(world: &mut ClinicWorld, text: String) {
    assert!(world.last.body.contains(&text), "expected {:?} in {}", text, world.last.body);
}

#[then(expr = "the page does not contain {string}")]
async fn then_not_contains(world: &mut ClinicWorld, text: String) {
    assert!(!world.last.body.contains(&text), "unexpected {:?} in page", text);
}

#[then(expr = "the form reports the error {string}")]
async fn then_form_error(world: &mut ClinicWorld, code: String) {
    let marker = format!("data-code=\"{}\"", code);
    assert!(world.last.body.contains(&marker), "expected {} error in {}", code, world.last.body);
}
