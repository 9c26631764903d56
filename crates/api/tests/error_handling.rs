//! `AppError` to HTTP response mapping, checked without a server.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use voskhod_api::error::AppError;
use voskhod_core::error::CoreError;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn domain_errors_map_to_status_and_code() {
    let cases = [
        (
            AppError::Core(CoreError::NotFound { entity: "Ticket", id: 42 }),
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Ticket with id 42 not found",
        ),
        (
            AppError::Core(CoreError::Validation("Ticket day 2026-01-01 is in the past".into())),
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Ticket day 2026-01-01 is in the past",
        ),
        (
            AppError::Core(CoreError::Conflict("Shift is already closed".into())),
            StatusCode::CONFLICT,
            "CONFLICT",
            "Shift is already closed",
        ),
        (
            AppError::Core(CoreError::Unauthorized("Missing Authorization header".into())),
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Missing Authorization header",
        ),
        (
            AppError::Core(CoreError::Forbidden("Cannot sell tickets: no shift is open today".into())),
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "Cannot sell tickets: no shift is open today",
        ),
        (
            AppError::NotFound("No shift is open today".into()),
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "No shift is open today",
        ),
        (
            AppError::BadRequest("Invalid username or password".into()),
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            "Invalid username or password",
        ),
    ];

    for (err, status, code, message) in cases {
        let (got_status, json) = error_to_response(err).await;
        assert_eq!(got_status, status, "{message}");
        assert_eq!(json["code"], code);
        assert_eq!(json["error"], message);
    }
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    for err in [
        AppError::InternalError("secret database credentials leaked".into()),
        AppError::Core(CoreError::Internal("secret QR encoder state".into())),
    ] {
        let (status, json) = error_to_response(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
        assert!(!json.to_string().contains("secret"));
    }
}

#[tokio::test]
async fn missing_row_is_not_found() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
