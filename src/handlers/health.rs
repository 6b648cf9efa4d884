use axum::Json;
use serde::Serialize;

use crate::version::GIT_VERSION;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    git_version: &'static str,
}

#[derive(Serialize)]
pub struct ApiRoot {
    sessions: &'static str,
    exercises: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        git_version: GIT_VERSION,
    })
}

/// Index of the browsable resources.
pub async fn api_root() -> Json<ApiRoot> {
    Json(ApiRoot {
        sessions: "/sessions/",
        exercises: "/exercises/",
    })
}
