//! End-to-end request flows through `ClinicServer::respond`, no sockets.

use http_body_util::BodyExt;
use hyper::header::{ACCEPT, ALLOW, CONTENT_TYPE, LOCATION};
use hyper::{Method, StatusCode};

use petclinic_core::app::RequestInput;
use petclinic_core::config::ClinicConfig;
use petclinic_core::http::Resp;
use petclinic_core::repository::{OwnerRepository, PetRepository};
use petclinic_core::{Clinic, ClinicServer};

fn server_with(clinic: Clinic) -> ClinicServer {
    ClinicServer::with_config(ClinicConfig::default())
        .with_clinic(clinic)
        .build()
        .expect("valid default config")
}

fn demo_server() -> (ClinicServer, Clinic) {
    let clinic = Clinic::in_memory(true);
    (server_with(clinic.clone()), clinic)
}

async fn body_text(resp: Resp) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(resp: &Resp) -> &str {
    resp.headers()[LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn search_without_filter_lists_every_owner() {
    let (server, _) = demo_server();
    let resp = server.respond(RequestInput::get("/owners")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("data-template=\"owners/ownersList\""));
    for last_name in ["Franklin", "Davis", "Rodriquez", "McTavish", "Estaban"] {
        assert!(html.contains(last_name), "{} missing", last_name);
    }
}

#[tokio::test]
async fn search_with_single_match_redirects_to_owner() {
    let (server, _) = demo_server();
    let resp = server.respond(RequestInput::get("/owners?lastName=Franklin")).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/owners/1");
}

#[tokio::test]
async fn search_with_no_match_shows_form_with_error() {
    let (server, _) = demo_server();
    let resp = server.respond(RequestInput::get("/owners?lastName=Unknown")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("data-template=\"owners/findOwners\""));
    assert!(html.contains("data-code=\"notFound\""));
    assert!(html.contains("value=\"Unknown\""));
}

#[tokio::test]
async fn search_with_several_matches_lists_them_in_order() {
    let (server, _) = demo_server();
    let html = body_text(server.respond(RequestInput::get("/owners?lastName=Davis")).await).await;

    let betty = html.find("Betty Davis").expect("Betty listed");
    let harold = html.find("Harold Davis").expect("Harold listed");
    assert!(betty < harold);
    assert!(!html.contains("Franklin"));
}

#[tokio::test]
async fn created_owner_reads_back_identically() {
    let (server, clinic) = demo_server();
    let resp = server
        .respond(RequestInput::post_form(
            "/owners/new",
            "firstName=Ada&lastName=Lovelace&address=12+St+James%27s+Sq.&city=London&telephone=0123456789",
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/owners/11");

    let owner = clinic.owners.find_by_id(11).await.unwrap();
    assert_eq!(owner.first_name, "Ada");
    assert_eq!(owner.last_name, "Lovelace");
    assert_eq!(owner.address, "12 St James's Sq.");
    assert_eq!(owner.city, "London");
    assert_eq!(owner.telephone, "0123456789");

    let html = body_text(server.respond(RequestInput::get("/owners/11")).await).await;
    assert!(html.contains("Ada Lovelace"));
    assert!(html.contains("St James&#39;s Sq."));
}

#[tokio::test]
async fn posted_id_cannot_overwrite_another_owner() {
    let (server, clinic) = demo_server();
    let resp = server
        .respond(RequestInput::post_form(
            "/owners/new",
            "id=1&firstName=Eve&lastName=Spoof&address=x&city=y&telephone=1",
        ))
        .await;
    assert_eq!(location(&resp), "/owners/11");
    assert_eq!(clinic.owners.find_by_id(1).await.unwrap().first_name, "George");
}

#[tokio::test]
async fn invalid_update_rerenders_submitted_values_and_keeps_store() {
    let (server, clinic) = demo_server();
    let resp = server
        .respond(RequestInput::post_form(
            "/owners/1/edit",
            "firstName=Georgina&lastName=&address=110+W.+Liberty+St.&city=Madison&telephone=6085551023",
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("data-template=\"owners/createOrUpdateOwnerForm\""));
    assert!(html.contains("value=\"Georgina\""));
    assert!(html.contains("data-code=\"required\""));

    let stored = clinic.owners.find_by_id(1).await.unwrap();
    assert_eq!(stored.first_name, "George");
    assert_eq!(stored.last_name, "Franklin");
}

#[tokio::test]
async fn duplicate_pet_name_is_rejected_without_saving() {
    let (server, clinic) = demo_server();
    let before = clinic.owners.find_by_id(1).await.unwrap();

    let resp = server
        .respond(RequestInput::post_form(
            "/owners/1/pets/new",
            "name=Leo&birthDate=2020-01-01&type=cat",
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("data-code=\"duplicate\""));

    assert_eq!(clinic.owners.find_by_id(1).await.unwrap(), before);
}

#[tokio::test]
async fn pet_and_visit_are_added_then_shown() {
    let (server, clinic) = demo_server();
    let resp = server
        .respond(RequestInput::post_form(
            "/owners/2/pets/new",
            "name=Pepper&birthDate=2019-05-05&type=bird",
        ))
        .await;
    assert_eq!(location(&resp), "/owners/2");

    let owner = clinic.owners.find_by_id(2).await.unwrap();
    let pet_id = owner.pet("Pepper", true).and_then(|p| p.id).expect("pet saved");

    let resp = server
        .respond(RequestInput::post_form(
            &format!("/owners/2/pets/{}/visits/new", pet_id),
            "date=2024-06-01&description=wing+check",
        ))
        .await;
    assert_eq!(location(&resp), "/owners/2");

    let html = body_text(server.respond(RequestInput::get("/owners/2")).await).await;
    assert!(html.contains("Pepper"));
    assert!(html.contains("wing check"));
    assert!(html.contains("2024-06-01"));
}

#[tokio::test]
async fn pet_update_form_prefills_stored_values() {
    let (server, _) = demo_server();
    let resp = server.respond(RequestInput::get("/owners/6/pets/8/edit")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("value=\"Max\""));
    assert!(html.contains("value=\"2012-09-04\""));
    assert!(html.contains("<option value=\"cat\" selected>"));
}

#[tokio::test]
async fn bad_birth_date_keeps_raw_text() {
    let (server, clinic) = demo_server();
    let resp = server
        .respond(RequestInput::post_form(
            "/owners/1/pets/new",
            "name=Rex&birthDate=not-a-date&type=dog",
        ))
        .await;
    let html = body_text(resp).await;
    assert!(html.contains("value=\"not-a-date\""));
    assert!(html.contains("data-code=\"typeMismatch\""));
    assert!(clinic.owners.find_by_id(1).await.unwrap().pet("Rex", true).is_none());
}

#[tokio::test]
async fn unknown_owner_is_404_and_bad_id_is_400() {
    let (server, _) = demo_server();
    let resp = server.respond(RequestInput::get("/owners/999")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_text(resp).await.contains("data-template=\"error\""));

    let resp = server.respond(RequestInput::get("/owners/abc")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = server.respond(RequestInput::get("/owners/2/pets/1/edit")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_path_and_wrong_method() {
    let (server, _) = demo_server();
    assert_eq!(server.respond(RequestInput::get("/nowhere")).await.status(), StatusCode::NOT_FOUND);

    let resp = server.respond(RequestInput::new(Method::DELETE, "/owners/1")).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers()[ALLOW], "GET");
}

#[tokio::test]
async fn crash_endpoint_renders_failure_page() {
    let (server, _) = demo_server();
    let resp = server.respond(RequestInput::get("/oups")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(resp).await.contains("Something happened"));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = ClinicServer::with_config(ClinicConfig::default())
        .with_clinic(Clinic::in_memory(true))
        .with_max_body_size(16)
        .build()
        .unwrap();
    let resp = server
        .respond(RequestInput::post_form(
            "/owners/new",
            "firstName=Someone&lastName=With+A+Long+Name",
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn vets_are_negotiated() {
    let (server, _) = demo_server();

    let resp = server.respond(RequestInput::get("/vets")).await;
    assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
    let body: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(body["vetList"].as_array().unwrap().len(), 6);
    assert_eq!(body["vetList"][2]["nrOfSpecialties"], 2);

    let resp = server
        .respond(RequestInput::get("/vets").with_header(ACCEPT, "text/html,*/*;q=0.8"))
        .await;
    assert!(resp.headers()[CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));

    let resp = server
        .respond(RequestInput::get("/vets.html").with_header(ACCEPT, "application/json"))
        .await;
    let html = body_text(resp).await;
    assert!(html.contains("data-template=\"vets/vetList\""));
    assert!(html.contains("Linda Douglas"));
}

#[tokio::test]
async fn unseeded_clinic_starts_empty() {
    let clinic = Clinic::in_memory(false);
    let server = server_with(clinic.clone());
    let resp = server.respond(RequestInput::get("/owners")).await;
    assert!(body_text(resp).await.contains("data-code=\"notFound\""));
    assert!(clinic.pets.find_pet_types().await.unwrap().len() == 6);
}
