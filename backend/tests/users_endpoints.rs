//! End-to-end HTTP tests through the public crate surface.
//!
//! Builds the same app shape the binary serves, backed by the in-memory
//! store, and checks cross-cutting behaviour: trace headers, the JSON error
//! shape and the full create-read-update-delete cycle.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};
use userbase::Trace;
use userbase::domain::TRACE_ID_HEADER;
use userbase::inbound::http::health::{HealthState, StoreKind, live, ready};
use userbase::inbound::http::state::HttpState;
use userbase::inbound::http::users;
use userbase::outbound::memory::InMemoryUserRepository;

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::for_repository(Arc::new(
                    InMemoryUserRepository::new(),
                ))))
                .app_data(web::Data::new(HealthState::new(StoreKind::Memory)))
                .wrap(Trace)
                .configure(users::configure)
                .service(ready)
                .service(live),
        )
        .await
    };
}

#[rstest]
#[actix_web::test]
async fn crud_cycle_over_http() {
    let app = app!();

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/create")
            .set_json(json!({ "full_name": "Alice", "role": "admin", "efficiency": 5 }))
            .to_request(),
    )
    .await;
    assert_eq!(created, json!({ "success": true, "result": { "id": 1 } }));

    let updated: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::patch()
            .uri("/update/1")
            .set_json(json!({ "role": "lead" }))
            .to_request(),
    )
    .await;
    assert_eq!(updated["result"]["role"], "lead");
    assert_eq!(updated["result"]["efficiency"], 5);

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/get?role=lead").to_request(),
    )
    .await;
    assert_eq!(listed["result"]["users"][0]["full_name"], "Alice");

    let deleted: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::delete().uri("/delete/1").to_request(),
    )
    .await;
    assert_eq!(
        deleted["result"],
        json!({ "id": 1, "full_name": "Alice", "role": "lead", "efficiency": 5 })
    );

    let cleared: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::delete().uri("/delete").to_request(),
    )
    .await;
    assert_eq!(cleared, json!({ "success": true }));
}

#[rstest]
#[case("/get")]
#[case("/get/1")]
#[case("/get/nope")]
#[case("/health/live")]
#[actix_web::test]
async fn every_response_carries_a_trace_id(#[case] uri: &str) {
    let app = app!();

    let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace-id header present")
        .to_str()
        .expect("ascii header")
        .to_owned();
    assert_eq!(header.len(), 36);
}

#[rstest]
#[actix_web::test]
async fn not_found_body_matches_header() {
    let app = app!();

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/get/5").to_request()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = test::read_body_json(response).await;

    assert_eq!(body["error"], "User not found");
    assert_eq!(body["traceId"].as_str(), header.as_deref());
}

#[rstest]
#[actix_web::test]
async fn readiness_reports_starting_until_marked() {
    let app = app!();

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
