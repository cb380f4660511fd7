mod common;

use axum::http::StatusCode;
use common::{TestApp, parse_body};
use serde_json::{Value, json};

async fn setup(app: &TestApp) {
    app.seed_company("comp-1").await;
    app.seed_company("comp-2").await;
    app.seed_trainer("trn-1", &["yoga", "strength"]).await;
    app.seed_trainer("trn-2", &["yoga"]).await;
}

async fn create_booking(app: &TestApp, company: &str, trainer: &str, date: &str, time: &str) -> String {
    let res = app
        .send(
            "POST",
            "/api/v1/bookings",
            Some(&app.company(company)),
            Some(json!({
                "trainer_id": trainer,
                "date": date,
                "start_time": time,
                "duration_hours": 1.0,
                "training_types": ["yoga"]
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

async fn approve(app: &TestApp, id: &str) {
    let res = app
        .send(
            "POST",
            &format!("/api/v1/bookings/{id}/approve"),
            Some(&app.admin()),
            Some(json!({
                "payment": {"mode": "card", "transaction_id": format!("tx-{id}"), "type": "full", "amount": 250}
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
}

async fn list(app: &TestApp, uri: &str, auth: &common::AuthHeaders) -> Value {
    let res = app.send("GET", uri, Some(auth), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await
}

#[tokio::test]
async fn test_admin_list_is_unrestricted_and_paginated() {
    let app = TestApp::new().await;
    setup(&app).await;

    create_booking(&app, "comp-1", "trn-1", "2030-06-02", "09:00").await;
    create_booking(&app, "comp-1", "trn-1", "2030-06-02", "11:00").await;
    create_booking(&app, "comp-2", "trn-2", "2030-06-03", "09:00").await;

    let body = list(&app, "/api/v1/admin/bookings", &app.admin()).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);

    let page = list(&app, "/api/v1/admin/bookings?limit=2&offset=2", &app.admin()).await;
    assert_eq!(page["total"], 3);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert_eq!(page["limit"], 2);
    assert_eq!(page["offset"], 2);
}

#[tokio::test]
async fn test_admin_list_filters_by_status_and_trainer() {
    let app = TestApp::new().await;
    setup(&app).await;

    let approved = create_booking(&app, "comp-1", "trn-1", "2030-06-02", "09:00").await;
    approve(&app, &approved).await;
    create_booking(&app, "comp-1", "trn-1", "2030-06-02", "11:00").await;
    create_booking(&app, "comp-2", "trn-2", "2030-06-02", "09:00").await;

    let body = list(&app, "/api/v1/admin/bookings?status=APPROVED", &app.admin()).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], approved.as_str());

    let body = list(&app, "/api/v1/admin/bookings?trainer_id=trn-2", &app.admin()).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["trainer_id"], "trn-2");

    let res = app
        .send("GET", "/api/v1/admin/bookings?status=NONSENSE", Some(&app.admin()), None)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_lists_reject_other_roles() {
    let app = TestApp::new().await;
    setup(&app).await;

    for uri in ["/api/v1/admin/bookings", "/api/v1/admin/bookings/pending"] {
        let as_company = app.send("GET", uri, Some(&app.company("comp-1")), None).await;
        assert_eq!(as_company.status(), StatusCode::FORBIDDEN);

        let as_trainer = app.send("GET", uri, Some(&app.trainer("trn-1")), None).await;
        assert_eq!(as_trainer.status(), StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_pending_queue_only_contains_pending_bookings() {
    let app = TestApp::new().await;
    setup(&app).await;

    let approved = create_booking(&app, "comp-1", "trn-1", "2030-06-02", "09:00").await;
    approve(&app, &approved).await;
    let pending = create_booking(&app, "comp-1", "trn-1", "2030-06-02", "11:00").await;

    let body = list(&app, "/api/v1/admin/bookings/pending", &app.admin()).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], pending.as_str());
    assert_eq!(body["items"][0]["status"], "PENDING_APPROVAL");
}

#[tokio::test]
async fn test_company_list_is_scoped_to_own_bookings() {
    let app = TestApp::new().await;
    setup(&app).await;

    create_booking(&app, "comp-1", "trn-1", "2030-06-02", "09:00").await;
    create_booking(&app, "comp-2", "trn-1", "2030-06-02", "11:00").await;

    let body = list(&app, "/api/v1/company/bookings", &app.company("comp-1")).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["company_id"], "comp-1");

    // The implicit scope wins over a spoofed filter.
    let body = list(
        &app,
        "/api/v1/company/bookings?company_id=comp-2",
        &app.company("comp-1"),
    )
    .await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["company_id"], "comp-1");
}

#[tokio::test]
async fn test_trainer_list_hides_unapproved_bookings() {
    let app = TestApp::new().await;
    setup(&app).await;

    let approved = create_booking(&app, "comp-1", "trn-1", "2030-06-02", "09:00").await;
    approve(&app, &approved).await;
    create_booking(&app, "comp-1", "trn-1", "2030-06-02", "11:00").await;
    let other = create_booking(&app, "comp-2", "trn-2", "2030-06-02", "09:00").await;
    approve(&app, &other).await;

    let body = list(&app, "/api/v1/trainer/bookings", &app.trainer("trn-1")).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], approved.as_str());
    let items = body["items"].as_array().unwrap();
    assert!(items.iter().all(|b| b["is_approved_by_admin"] == true));
}

#[tokio::test]
async fn test_trainer_list_includes_later_lifecycle_states() {
    let app = TestApp::new().await;
    setup(&app).await;

    let id = create_booking(&app, "comp-1", "trn-1", "2030-06-02", "09:00").await;
    approve(&app, &id).await;
    let res = app
        .send(
            "POST",
            &format!("/api/v1/bookings/{id}/confirm"),
            Some(&app.trainer("trn-1")),
            None,
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = list(
        &app,
        "/api/v1/trainer/bookings?status=CONFIRMED",
        &app.trainer("trn-1"),
    )
    .await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["status"], "CONFIRMED");
}

#[tokio::test]
async fn test_sorting_by_booking_date() {
    let app = TestApp::new().await;
    setup(&app).await;

    create_booking(&app, "comp-1", "trn-1", "2030-06-04", "09:00").await;
    create_booking(&app, "comp-1", "trn-1", "2030-06-02", "09:00").await;
    create_booking(&app, "comp-1", "trn-1", "2030-06-03", "09:00").await;

    let body = list(
        &app,
        "/api/v1/admin/bookings?sort=booking_date&order=asc",
        &app.admin(),
    )
    .await;
    let dates: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["booking_date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2030-06-02", "2030-06-03", "2030-06-04"]);

    let body = list(
        &app,
        "/api/v1/admin/bookings?sort=booking_date&order=desc",
        &app.admin(),
    )
    .await;
    let dates: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["booking_date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2030-06-04", "2030-06-03", "2030-06-02"]);
}

#[tokio::test]
async fn test_date_range_filter() {
    let app = TestApp::new().await;
    setup(&app).await;

    create_booking(&app, "comp-1", "trn-1", "2030-06-02", "09:00").await;
    create_booking(&app, "comp-1", "trn-1", "2030-06-05", "09:00").await;
    create_booking(&app, "comp-1", "trn-1", "2030-06-09", "09:00").await;

    let body = list(
        &app,
        "/api/v1/admin/bookings?from=2030-06-03&to=2030-06-08",
        &app.admin(),
    )
    .await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["booking_date"], "2030-06-05");
}
