//! HTTP-level tests for operator accounts and the sales catalog.

mod common;

use axum::http::StatusCode;
use axum::response::Response;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth, token_for};
use sqlx::PgPool;

async fn admin_post(pool: &PgPool, token: &str, uri: &str, body: serde_json::Value) -> Response {
    post_json_auth(common::build_test_app(pool.clone()), uri, body, token).await
}

async fn created_id(response: Response) -> i64 {
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn administration_manages_operator_accounts(pool: PgPool) {
    let admin = token_for(&pool, "boss", "administration").await;

    let body = serde_json::json!({
        "username": "kassa1",
        "full_name": "Anna Petrova",
        "inn": "7707083893",
        "role": "operator",
        "password": "long_enough_pw"
    });
    let response = admin_post(&pool, &admin, "/api/v1/operators", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    assert_eq!(created["username"], "kassa1");
    assert!(created.get("password_hash").is_none());

    let response = admin_post(&pool, &admin, "/api/v1/operators", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/operators?role=operator",
        &admin,
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let uri = format!("/api/v1/operators/{}", created["id"]);
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "role": "captain" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["role"], "captain");

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(common::build_test_app(pool), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn operator_input_is_validated(pool: PgPool) {
    let admin = token_for(&pool, "boss", "administration").await;

    let bad_inn = serde_json::json!({
        "username": "kassa1",
        "inn": "12ab",
        "role": "operator",
        "password": "long_enough_pw"
    });
    let response = admin_post(&pool, &admin, "/api/v1/operators", bad_inn).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "inn: must be 10 to 12 digits"
    );

    let bad_role = serde_json::json!({
        "username": "kassa1",
        "role": "admin",
        "password": "long_enough_pw"
    });
    let response = admin_post(&pool, &admin, "/api/v1/operators", bad_role).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let short_password = serde_json::json!({
        "username": "kassa1",
        "role": "operator",
        "password": "short"
    });
    let response = admin_post(&pool, &admin, "/api/v1/operators", short_password).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivation_ends_sessions(pool: PgPool) {
    let admin = token_for(&pool, "boss", "administration").await;
    let cashier = token_for(&pool, "kassa1", "operator").await;
    let kassa1 = voskhod_db::repositories::OperatorRepo::find_by_username(&pool, "kassa1")
        .await
        .unwrap()
        .unwrap();

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/operators/{}", kassa1.id),
        serde_json::json!({ "is_active": false }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(common::build_test_app(pool), "/api/v1/ships", &cashier).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn role_change_ends_sessions(pool: PgPool) {
    let admin = token_for(&pool, "boss", "administration").await;
    let cashier = token_for(&pool, "kassa1", "operator").await;
    let kassa1 = voskhod_db::repositories::OperatorRepo::find_by_username(&pool, "kassa1")
        .await
        .unwrap()
        .unwrap();
    let uri = format!("/api/v1/operators/{}", kassa1.id);

    // Same role: tokens stay valid.
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "role": "operator", "full_name": "Anna Petrova" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/ships", &cashier).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "role": "captain" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/ships", &cashier).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let data = common::login(&pool, "kassa1").await;
    assert_eq!(data["user"]["role"], "captain");
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn prices_and_price_types(pool: PgPool) {
    let admin = token_for(&pool, "boss", "administration").await;
    let cashier = token_for(&pool, "kassa1", "operator").await;

    let price_id = created_id(
        admin_post(&pool, &admin, "/api/v1/prices", serde_json::json!({ "amount": "1200.00" }))
            .await,
    )
    .await;

    let response =
        admin_post(&pool, &admin, "/api/v1/prices", serde_json::json!({ "amount": "1200.00" }))
            .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response =
        admin_post(&pool, &admin, "/api/v1/prices", serde_json::json!({ "amount": "-5" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = admin_post(
        &pool,
        &admin,
        "/api/v1/price-types",
        serde_json::json!({ "client_category": "adult", "price_id": price_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["amount"], "1200.00");

    let response = admin_post(
        &pool,
        &admin,
        "/api/v1/price-types",
        serde_json::json!({ "client_category": "senior", "price_id": price_id }),
    )
    .await;
    assert!(response.status().is_client_error());

    // Cashiers read the catalog but cannot change it.
    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/price-types", &cashier).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = admin_post(
        &pool,
        &cashier,
        "/api/v1/prices",
        serde_json::json!({ "amount": "10.00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A price in use cannot be deleted.
    let response = delete_auth(
        common::build_test_app(pool),
        &format!("/api/v1/prices/{price_id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ships_and_schedules(pool: PgPool) {
    let admin = token_for(&pool, "boss", "administration").await;

    let response = admin_post(&pool, &admin, "/api/v1/ships", serde_json::json!({ "name": "Zarya" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let ship = body_json(response).await["data"].clone();
    assert_eq!(ship["seat_limit"], 20);

    let response = admin_post(
        &pool,
        &admin,
        "/api/v1/ships",
        serde_json::json!({ "name": "Empty", "seat_limit": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let berth_id = created_id(
        admin_post(&pool, &admin, "/api/v1/berths", serde_json::json!({ "name": "Pier 3" })).await,
    )
    .await;

    let response = admin_post(
        &pool,
        &admin,
        "/api/v1/schedules",
        serde_json::json!({
            "ship_id": ship["id"],
            "berth_id": berth_id,
            "start_time": "12:00:00",
            "end_time": "11:00:00"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = admin_post(
        &pool,
        &admin,
        "/api/v1/schedules",
        serde_json::json!({
            "ship_id": 987654,
            "start_time": "12:00:00",
            "end_time": "13:00:00"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = admin_post(
        &pool,
        &admin,
        "/api/v1/schedules",
        serde_json::json!({
            "ship_id": ship["id"],
            "berth_id": berth_id,
            "start_time": "12:00:00",
            "end_time": "13:30:00"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let schedule = body_json(response).await["data"].clone();
    assert_eq!(schedule["ship_name"], "Zarya");
    assert_eq!(schedule["berth_name"], "Pier 3");

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/schedules?ship_id={}", ship["id"]),
        &admin,
    )
    .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    // The berth has departures, so it stays.
    let response = delete_auth(
        common::build_test_app(pool),
        &format!("/api/v1/berths/{berth_id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
