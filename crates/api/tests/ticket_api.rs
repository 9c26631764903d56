//! HTTP-level tests for selling, returning, checking in and verifying tickets.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, NaiveTime};
use common::{
    body_json, get_auth, post_json, post_json_auth, seed_catalog, test_clock, token_for, Catalog,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use voskhod_core::qr::TicketQrPayload;

fn ten_am() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap()
}

fn tomorrow() -> String {
    (test_clock().today() + Duration::days(1)).to_string()
}

fn sale(catalog: &Catalog, adults: i32, children: i32) -> serde_json::Value {
    serde_json::json!({
        "schedule_id": catalog.schedule_id,
        "price_type_ids": [catalog.adult_price_type, catalog.child_price_type],
        "ticket_day": tomorrow(),
        "adult_quantity": adults,
        "child_quantity": children,
        "bought": true
    })
}

async fn sell(pool: &PgPool, token: &str, body: serde_json::Value) -> axum::response::Response {
    post_json_auth(common::build_test_app(pool.clone()), "/api/v1/tickets", body, token).await
}

async fn sell_ok(pool: &PgPool, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = sell(pool, token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Sale
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sale_prices_ticket_and_updates_report(pool: PgPool) {
    let catalog = seed_catalog(&pool, 20, ten_am()).await;
    let cashier = token_for(&pool, "kassa1", "operator").await;
    let admin = token_for(&pool, "boss", "administration").await;

    let ticket = sell_ok(&pool, &cashier, sale(&catalog, 2, 1)).await;

    assert_eq!(ticket["total_amount"], "2500.00");
    assert_eq!(ticket["ship_name"], "Zarya");
    assert_eq!(ticket["ticket_day"], tomorrow());
    assert_eq!(ticket["returned"], false);
    assert_eq!(ticket["expired"], false);
    assert!(ticket["qr_payload"].is_string());

    let response = get_auth(common::build_test_app(pool), "/api/v1/reports", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let reports = body_json(response).await["data"].clone();
    assert_eq!(reports.as_array().unwrap().len(), 1);
    assert_eq!(reports[0]["shift_id"], ticket["shift_id"]);
    assert_eq!(reports[0]["total_adult_quantity"], 2);
    assert_eq!(reports[0]["total_child_quantity"], 1);
    assert_eq!(reports[0]["total_amount"], "2500.00");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_listed_price_types_are_charged(pool: PgPool) {
    let catalog = seed_catalog(&pool, 20, ten_am()).await;
    let cashier = token_for(&pool, "kassa1", "operator").await;

    let body = serde_json::json!({
        "schedule_id": catalog.schedule_id,
        "price_type_ids": [catalog.adult_price_type],
        "ticket_day": tomorrow(),
        "adult_quantity": 1,
        "child_quantity": 2
    });
    let ticket = sell_ok(&pool, &cashier, body).await;

    assert_eq!(ticket["total_amount"], "1000.00");
    assert_eq!(ticket["bought"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sale_needs_a_price_type_and_a_passenger(pool: PgPool) {
    let catalog = seed_catalog(&pool, 20, ten_am()).await;
    let cashier = token_for(&pool, "kassa1", "operator").await;

    let no_types = serde_json::json!({
        "schedule_id": catalog.schedule_id,
        "price_type_ids": [],
        "adult_quantity": 1
    });
    let response = sell(&pool, &cashier, no_types).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = sell(&pool, &cashier, sale(&catalog, 0, 0)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unknown = serde_json::json!({
        "schedule_id": catalog.schedule_id,
        "price_type_ids": [catalog.adult_price_type, 9999],
        "adult_quantity": 1
    });
    let response = sell(&pool, &cashier, unknown).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Unknown price type(s): 9999"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn total_beyond_money_column_is_rejected(pool: PgPool) {
    let catalog = seed_catalog(&pool, 50_000_000, ten_am()).await;
    let cashier = token_for(&pool, "kassa1", "operator").await;

    // 20 000 000 adults at 1000.00 overflow NUMERIC(12,2).
    let response = sell(&pool, &cashier, sale(&catalog, 20_000_000, 0)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("exceeds the maximum"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn past_ticket_day_is_rejected(pool: PgPool) {
    let catalog = seed_catalog(&pool, 20, ten_am()).await;
    let cashier = token_for(&pool, "kassa1", "operator").await;

    let mut body = sale(&catalog, 1, 0);
    body["ticket_day"] = (test_clock().today() - Duration::days(1)).to_string().into();
    let response = sell(&pool, &cashier, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn seat_limit_counts_every_cashier(pool: PgPool) {
    let catalog = seed_catalog(&pool, 3, ten_am()).await;
    let first = token_for(&pool, "kassa1", "operator").await;
    let second = token_for(&pool, "kassa2", "operator").await;

    sell_ok(&pool, &first, sale(&catalog, 2, 0)).await;

    let response = sell(&pool, &second, sale(&catalog, 1, 1)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("1 of 3 left"));

    sell_ok(&pool, &second, sale(&catalog, 0, 1)).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_cashiers_sell(pool: PgPool) {
    let catalog = seed_catalog(&pool, 20, ten_am()).await;
    let captain = token_for(&pool, "captain1", "captain").await;

    let response = sell(&pool, &captain, sale(&catalog, 1, 0)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn yesterdays_shift_cannot_sell(pool: PgPool) {
    let catalog = seed_catalog(&pool, 20, ten_am()).await;
    let cashier = token_for(&pool, "kassa1", "operator").await;
    sqlx::query("UPDATE shifts SET opened_on = opened_on - 1")
        .execute(&pool)
        .await
        .unwrap();

    let response = sell(&pool, &cashier, sale(&catalog, 1, 0)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"],
        "Cannot sell tickets: no shift is open today"
    );
}

// ---------------------------------------------------------------------------
// Visibility and receipts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn cashiers_only_see_their_own_tickets(pool: PgPool) {
    let catalog = seed_catalog(&pool, 20, ten_am()).await;
    let owner = token_for(&pool, "kassa1", "operator").await;
    let other = token_for(&pool, "kassa2", "operator").await;
    let admin = token_for(&pool, "boss", "administration").await;
    let ticket = sell_ok(&pool, &owner, sale(&catalog, 1, 0)).await;
    let uri = format!("/api/v1/tickets/{}", ticket["id"]);

    let response = get_auth(common::build_test_app(pool.clone()), &uri, &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(common::build_test_app(pool.clone()), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/tickets", &other).await;
    assert_eq!(body_json(response).await["data"], serde_json::json!([]));

    let response = get_auth(common::build_test_app(pool), "/api/v1/tickets", &admin).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn receipt_lists_trip_and_total(pool: PgPool) {
    let catalog = seed_catalog(&pool, 20, ten_am()).await;
    let cashier = token_for(&pool, "kassa1", "operator").await;
    let ticket = sell_ok(&pool, &cashier, sale(&catalog, 2, 1)).await;

    let uri = format!("/api/v1/tickets/{}/receipt", ticket["id"]);
    let response = get_auth(common::build_test_app(pool), &uri, &cashier).await;

    assert_eq!(response.status(), StatusCode::OK);
    let receipt = body_json(response).await["data"].clone();
    assert_eq!(receipt["ticket_id"], ticket["id"]);
    assert_eq!(receipt["qr_payload"], ticket["qr_payload"]);
    let lines: Vec<&str> = receipt["lines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l.as_str().unwrap())
        .collect();
    assert_eq!(lines[0], "Cashier: kassa1");
    assert!(lines.contains(&"Departure: 10:00"));
    assert_eq!(*lines.last().unwrap(), "Total: 2500.00");
}

// ---------------------------------------------------------------------------
// Return
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn return_drops_ticket_from_report_and_frees_seats(pool: PgPool) {
    let catalog = seed_catalog(&pool, 2, ten_am()).await;
    let cashier = token_for(&pool, "kassa1", "operator").await;
    let admin = token_for(&pool, "boss", "administration").await;
    let ticket = sell_ok(&pool, &cashier, sale(&catalog, 2, 0)).await;

    let uri = format!("/api/v1/tickets/{}/return", ticket["id"]);
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({}),
        &cashier,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["returned"], true);

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/reports", &admin).await;
    let reports = body_json(response).await["data"].clone();
    assert_eq!(reports[0]["total_adult_quantity"], 0);
    assert_eq!(reports[0]["total_amount"], "0.00");

    // Seats are free again.
    sell_ok(&pool, &cashier, sale(&catalog, 2, 0)).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &uri,
        serde_json::json!({}),
        &cashier,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn another_cashier_cannot_return(pool: PgPool) {
    let catalog = seed_catalog(&pool, 20, ten_am()).await;
    let owner = token_for(&pool, "kassa1", "operator").await;
    let other = token_for(&pool, "kassa2", "operator").await;
    let ticket = sell_ok(&pool, &owner, sale(&catalog, 1, 0)).await;

    let uri = format!("/api/v1/tickets/{}/return", ticket["id"]);
    let response = post_json_auth(
        common::build_test_app(pool),
        &uri,
        serde_json::json!({}),
        &other,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Boarding
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn captain_checks_in_todays_ticket_once(pool: PgPool) {
    let catalog = seed_catalog(&pool, 20, ten_am()).await;
    let cashier = token_for(&pool, "kassa1", "operator").await;
    let captain = token_for(&pool, "captain1", "captain").await;

    let mut body = sale(&catalog, 1, 0);
    body["ticket_day"] = test_clock().today().to_string().into();
    let today_ticket = sell_ok(&pool, &cashier, body).await;
    let future_ticket = sell_ok(&pool, &cashier, sale(&catalog, 1, 0)).await;

    let uri = format!("/api/v1/tickets/{}/check-in", today_ticket["id"]);
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({}),
        &cashier,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({}),
        &captain,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["verified"], true);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({}),
        &captain,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // A boarded ticket cannot be returned.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/tickets/{}/return", today_ticket["id"]),
        serde_json::json!({}),
        &cashier,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/tickets/{}/check-in", future_ticket["id"]),
        serde_json::json!({}),
        &captain,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn verify_needs_no_login(pool: PgPool) {
    let catalog = seed_catalog(&pool, 20, ten_am()).await;
    let cashier = token_for(&pool, "kassa1", "operator").await;
    let ticket = sell_ok(&pool, &cashier, sale(&catalog, 2, 1)).await;

    let body = serde_json::json!({ "payload": ticket["qr_payload"] });
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/tickets/verify", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let verification = body_json(response).await["data"].clone();
    assert_eq!(verification["id"], ticket["id"]);
    assert_eq!(verification["adult_quantity"], 2);
    assert_eq!(verification["expired"], false);
    assert_eq!(verification["valid"], true);

    let garbage = serde_json::json!({ "payload": "definitely not a ticket" });
    let response = post_json(common::build_test_app(pool), "/api/v1/tickets/verify", garbage).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn departed_ticket_verifies_as_expired(pool: PgPool) {
    let payload = TicketQrPayload {
        id: 41,
        operator: "kassa1".into(),
        ticket_day: test_clock().today() - Duration::days(1),
        ship: "Zarya".into(),
        start_time: ten_am(),
        end_time: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
        total_amount: Decimal::new(100000, 2),
        landing_place: None,
        created_on: test_clock().today() - Duration::days(1),
        bought: true,
        adult_quantity: 1,
        child_quantity: 0,
    }
    .encode()
    .unwrap();

    let body = serde_json::json!({ "payload": payload });
    let response = post_json(common::build_test_app(pool), "/api/v1/tickets/verify", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let verification = body_json(response).await["data"].clone();
    assert_eq!(verification["id"], 41);
    assert_eq!(verification["expired"], true);
    assert_eq!(verification["valid"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ticket_reads_expired_once_departure_started(pool: PgPool) {
    // Midnight departure: already under way whenever the test runs.
    let catalog = seed_catalog(&pool, 20, NaiveTime::from_hms_opt(0, 0, 0).unwrap()).await;
    let cashier = token_for(&pool, "kassa1", "operator").await;
    let mut body = sale(&catalog, 1, 0);
    body["ticket_day"] = test_clock().today().to_string().into();
    let ticket = sell_ok(&pool, &cashier, body).await;
    assert_eq!(ticket["expired"], true);

    let uri = format!("/api/v1/tickets/{}", ticket["id"]);
    let response = get_auth(common::build_test_app(pool.clone()), &uri, &cashier).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["expired"], true);

    let body = serde_json::json!({ "payload": ticket["qr_payload"] });
    let response = post_json(common::build_test_app(pool), "/api/v1/tickets/verify", body).await;
    let verification = body_json(response).await["data"].clone();
    assert_eq!(verification["expired"], true);
    assert_eq!(verification["valid"], false);
}
