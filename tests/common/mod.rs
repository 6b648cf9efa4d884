#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use workoutlog::db::{create_memory_pool, DbPool};
use workoutlog::handlers::{exercises, sessions};
use workoutlog::migrations::run_migrations_for_tests;
use workoutlog::services::{ExerciseService, SessionService};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    let sessions_state = sessions::SessionsState {
        session_service: SessionService::new(pool.clone()),
    };
    let exercises_state = exercises::ExercisesState {
        exercise_service: ExerciseService::new(pool.clone()),
    };

    workoutlog::routes::create_router(sessions_state, exercises_state)
}

/// Send a request with an optional JSON body; returns the status and the
/// decoded body (`Value::Null` when empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn create_test_session(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, "POST", "/sessions/", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", json);
    json
}

pub fn leg_day() -> Value {
    serde_json::json!({
        "name": "Leg Day",
        "date": "2024-01-01",
        "exercises": [
            {"name": "Squat", "type": "strength", "sets": 5, "reps": 5, "weight": 100},
            {"name": "Calf Raise", "type": "strength", "sets": 3, "reps": 15}
        ]
    })
}

pub fn exercise_ids(session: &Value) -> Vec<String> {
    session["exercises"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect()
}
