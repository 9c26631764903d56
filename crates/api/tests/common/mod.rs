#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::NaiveTime;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower::ServiceExt;

use voskhod_api::auth::jwt::JwtConfig;
use voskhod_api::auth::password::hash_password;
use voskhod_api::config::{LogFormat, ServerConfig};
use voskhod_api::router::build_app_router;
use voskhod_api::state::AppState;
use voskhod_core::clock::BusinessClock;
use voskhod_core::pricing::ClientCategory;
use voskhod_core::types::DbId;
use voskhod_db::models::operator::{CreateOperator, Operator};
use voskhod_db::models::price::SavePrice;
use voskhod_db::models::price_type::CreatePriceType;
use voskhod_db::models::schedule::CreateSchedule;
use voskhod_db::models::ship::CreateShip;
use voskhod_db::repositories::{
    OperatorRepo, PriceRepo, PriceTypeRepo, ScheduleRepo, ShipRepo,
};

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        business_utc_offset_minutes: voskhod_core::clock::DEFAULT_OFFSET_MINUTES,
        log_format: LogFormat::Text,
        jwt: JwtConfig {
            secret: "test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 1,
        },
    }
}

pub fn test_clock() -> BusinessClock {
    BusinessClock::default()
}

/// The production router over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        clock: test_clock(),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, "DELETE", uri, Some(token), None).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert an operator with [`TEST_PASSWORD`].
pub async fn create_operator(pool: &PgPool, username: &str, role: &str) -> Operator {
    let input = CreateOperator {
        username: username.to_string(),
        full_name: None,
        inn: None,
        role: role.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    OperatorRepo::create(pool, &input)
        .await
        .expect("operator creation should succeed")
}

/// Log in through the API and return the `data` object of the response.
pub async fn login(pool: &PgPool, username: &str) -> serde_json::Value {
    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(build_test_app(pool.clone()), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

/// Create an operator of `role` and return their access token.
pub async fn token_for(pool: &PgPool, username: &str, role: &str) -> String {
    create_operator(pool, username, role).await;
    login(pool, username).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// A sellable catalog: adult 1000.00, child 500.00, one departure.
pub struct Catalog {
    pub adult_price_type: DbId,
    pub child_price_type: DbId,
    pub schedule_id: DbId,
}

pub async fn seed_catalog(pool: &PgPool, seat_limit: i32, start_time: NaiveTime) -> Catalog {
    let adult_price = PriceRepo::create(pool, &SavePrice { amount: Decimal::new(100000, 2) })
        .await
        .unwrap();
    let child_price = PriceRepo::create(pool, &SavePrice { amount: Decimal::new(50000, 2) })
        .await
        .unwrap();
    let adult = PriceTypeRepo::create(
        pool,
        &CreatePriceType {
            client_category: ClientCategory::Adult,
            price_id: adult_price.id,
        },
    )
    .await
    .unwrap();
    let child = PriceTypeRepo::create(
        pool,
        &CreatePriceType {
            client_category: ClientCategory::Child,
            price_id: child_price.id,
        },
    )
    .await
    .unwrap();
    let ship = ShipRepo::create(
        pool,
        &CreateShip {
            name: "Zarya".to_string(),
            seat_limit: Some(seat_limit),
        },
    )
    .await
    .unwrap();
    let schedule = ScheduleRepo::create(
        pool,
        &CreateSchedule {
            ship_id: ship.id,
            berth_id: None,
            start_time,
            end_time: start_time + chrono::Duration::minutes(90),
        },
    )
    .await
    .unwrap();

    Catalog {
        adult_price_type: adult.id,
        child_price_type: child.id,
        schedule_id: schedule.id,
    }
}
