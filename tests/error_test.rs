use axum::{http::StatusCode, response::IntoResponse};
use http_body_util::BodyExt;
use workoutlog::error::AppError;

#[test]
fn test_not_found_returns_404() {
    let error = AppError::NotFound("Resource not found".to_string());
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_bad_request_returns_400() {
    let error = AppError::BadRequest("Invalid input".to_string());
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_validation_returns_400() {
    let error = AppError::Validation("Invalid field".to_string());
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_internal_returns_500() {
    let error = AppError::Internal("Something went wrong".to_string());
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_database_error_returns_500() {
    let error = AppError::Database(rusqlite::Error::QueryReturnedNoRows);
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_body_is_json() {
    let response = AppError::NotFound("Session not found".to_string()).into_response();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["error"], "Session not found");
}

#[tokio::test]
async fn test_internal_details_are_not_leaked() {
    let response = AppError::Internal("secret path /var/db".to_string()).into_response();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["error"], "Internal error");
}
