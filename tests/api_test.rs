//! HTTP contract tests: routes, status codes, and payload shapes.

use actix_web::{App, test, web::Data};
use serde_json::{Value, json};

use leavedesk::config::Config;
use leavedesk::db::init_db;
use leavedesk::leave::LeaveService;
use leavedesk::routes;

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_addr: "127.0.0.1:0".to_string(),
        rate_write_per_min: 600,
        rate_api_per_min: 6000,
        api_prefix: "/api".to_string(),
    }
}

// The governor limiters key on the peer IP, so every test request carries one.
fn get(path: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri(path)
        .peer_addr("127.0.0.1:9999".parse().unwrap())
}

fn post(path: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri(path)
        .set_json(body)
        .peer_addr("127.0.0.1:9999".parse().unwrap())
}

fn put(path: &str, body: Value) -> test::TestRequest {
    test::TestRequest::put()
        .uri(path)
        .set_json(body)
        .peer_addr("127.0.0.1:9999".parse().unwrap())
}

macro_rules! init_app {
    () => {{
        let pool = init_db("sqlite::memory:").await.unwrap();
        let service = LeaveService::new(pool);
        test::init_service(
            App::new()
                .app_data(Data::new(service))
                .configure(|cfg| routes::configure(cfg, test_config())),
        )
        .await
    }};
}

fn employee_payload(email: &str) -> Value {
    json!({
        "name": "Jane Doe",
        "email": email,
        "department": "Engineering",
        "joining_date": "2024-01-01",
        "role": "employee"
    })
}

fn leave_payload(employee_id: i64, start: &str, end: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "start_date": start,
        "end_date": end,
        "reason": "family trip"
    })
}

#[actix_web::test]
async fn full_leave_lifecycle_over_http() {
    let app = init_app!();

    // Register
    let resp = test::call_service(
        &app,
        post("/api/employees?role=hr", employee_payload("jane@company.com")).to_request(),
    )
    .await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Employee registered");
    let emp = body["id"].as_i64().unwrap();

    // Starting balance
    let resp = test::call_service(
        &app,
        get(&format!("/api/employees/{emp}/balance")).to_request(),
    )
    .await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["employee_id"].as_i64().unwrap(), emp);
    assert_eq!(body["employee"], "Jane Doe");
    assert_eq!(body["leave_balance"], 20);

    // Apply
    let resp = test::call_service(
        &app,
        post("/api/leaves", leave_payload(emp, "2026-02-10", "2026-02-12")).to_request(),
    )
    .await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "pending");
    let leave_id = body["leave_id"].as_i64().unwrap();

    // History shows the pending request
    let resp = test::call_service(
        &app,
        get(&format!("/api/employees/{emp}/leaves")).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["status"], "pending");
    assert_eq!(list[0]["days"], 3);

    // Approve
    let resp = test::call_service(
        &app,
        put(
            &format!("/api/leaves/{leave_id}?role=hr"),
            json!({"status": "approved"}),
        )
        .to_request(),
    )
    .await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Leave approved");

    // Balance deducted
    let resp = test::call_service(
        &app,
        get(&format!("/api/employees/{emp}/balance")).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["leave_balance"], 17);

    // Single-leave lookup reflects the decision
    let resp = test::call_service(&app, get(&format!("/api/leaves/{leave_id}")).to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "approved");
}

#[actix_web::test]
async fn registering_without_hr_claim_is_forbidden() {
    let app = init_app!();

    let resp = test::call_service(
        &app,
        post("/api/employees", employee_payload("x@company.com")).to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 403);

    let resp = test::call_service(
        &app,
        post("/api/employees?role=employee", employee_payload("x@company.com")).to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 403);
}

#[actix_web::test]
async fn duplicate_email_maps_to_conflict() {
    let app = init_app!();

    let resp = test::call_service(
        &app,
        post("/api/employees?role=hr", employee_payload("dup@company.com")).to_request(),
    )
    .await;
    assert!(resp.status().is_success());

    let resp = test::call_service(
        &app,
        post("/api/employees?role=hr", employee_payload("dup@company.com")).to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 409);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "email already registered");
}

#[actix_web::test]
async fn applying_for_unknown_employee_is_not_found() {
    let app = init_app!();

    let resp = test::call_service(
        &app,
        post("/api/leaves", leave_payload(9999, "2026-02-10", "2026-02-12")).to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn bad_date_inputs_map_to_bad_request() {
    let app = init_app!();

    let resp = test::call_service(
        &app,
        post("/api/employees?role=hr", employee_payload("dates@company.com")).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let emp = body["id"].as_i64().unwrap();

    // end before start
    let resp = test::call_service(
        &app,
        post("/api/leaves", leave_payload(emp, "2026-02-12", "2026-02-10")).to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "end_date cannot be before start_date");

    // before joining date
    let resp = test::call_service(
        &app,
        post("/api/leaves", leave_payload(emp, "2023-12-28", "2024-01-02")).to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "leave cannot start before joining date");
}

#[actix_web::test]
async fn overlapping_application_maps_to_bad_request() {
    let app = init_app!();

    let resp = test::call_service(
        &app,
        post("/api/employees?role=hr", employee_payload("ol@company.com")).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let emp = body["id"].as_i64().unwrap();

    let resp = test::call_service(
        &app,
        post("/api/leaves", leave_payload(emp, "2026-02-10", "2026-02-12")).to_request(),
    )
    .await;
    assert!(resp.status().is_success());

    let resp = test::call_service(
        &app,
        post("/api/leaves", leave_payload(emp, "2026-02-11", "2026-02-13")).to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 400);

    // Adjacent range is fine.
    let resp = test::call_service(
        &app,
        post("/api/leaves", leave_payload(emp, "2026-02-13", "2026-02-15")).to_request(),
    )
    .await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn deciding_requires_hr_and_an_existing_pending_request() {
    let app = init_app!();

    let resp = test::call_service(
        &app,
        post("/api/employees?role=hr", employee_payload("dec@company.com")).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let emp = body["id"].as_i64().unwrap();

    let resp = test::call_service(
        &app,
        post("/api/leaves", leave_payload(emp, "2026-02-10", "2026-02-12")).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let leave_id = body["leave_id"].as_i64().unwrap();

    // No hr claim
    let resp = test::call_service(
        &app,
        put(&format!("/api/leaves/{leave_id}"), json!({"status": "approved"})).to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 403);

    // Unknown id
    let resp = test::call_service(
        &app,
        put("/api/leaves/424242?role=hr", json!({"status": "approved"})).to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 404);

    // Unknown target status
    let resp = test::call_service(
        &app,
        put(
            &format!("/api/leaves/{leave_id}?role=hr"),
            json!({"status": "cancelled"}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "status must be approved or rejected");

    // Reject, then any further decision is refused
    let resp = test::call_service(
        &app,
        put(
            &format!("/api/leaves/{leave_id}?role=hr"),
            json!({"status": "rejected"}),
        )
        .to_request(),
    )
    .await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Leave rejected");

    let resp = test::call_service(
        &app,
        put(
            &format!("/api/leaves/{leave_id}?role=hr"),
            json!({"status": "approved"}),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "leave request already processed");
}

#[actix_web::test]
async fn balance_and_history_for_unknown_employee_are_not_found() {
    let app = init_app!();

    let resp = test::call_service(&app, get("/api/employees/777/balance").to_request()).await;
    assert_eq!(resp.status().as_u16(), 404);

    let resp = test::call_service(&app, get("/api/employees/777/leaves").to_request()).await;
    assert_eq!(resp.status().as_u16(), 404);

    let resp = test::call_service(&app, get("/api/employees/777").to_request()).await;
    assert_eq!(resp.status().as_u16(), 404);
}

#[actix_web::test]
async fn employee_listing_is_hr_only_and_paginated() {
    let app = init_app!();

    for i in 0..3 {
        let resp = test::call_service(
            &app,
            post(
                "/api/employees?role=hr",
                employee_payload(&format!("w{i}@company.com")),
            )
            .to_request(),
        )
        .await;
        assert!(resp.status().is_success());
    }

    let resp = test::call_service(&app, get("/api/employees").to_request()).await;
    assert_eq!(resp.status().as_u16(), 403);

    let resp = test::call_service(&app, get("/api/employees?role=hr&per_page=2").to_request()).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["page"], 1);
}
