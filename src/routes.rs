use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{exercises, health, sessions};

pub fn create_router(
    sessions_state: sessions::SessionsState,
    exercises_state: exercises::ExercisesState,
) -> Router {
    Router::new()
        .route("/", get(health::api_root))
        .route("/health", get(health::health_check))
        // Session routes
        .route("/sessions", get(sessions::list).post(sessions::create))
        .route("/sessions/", get(sessions::list).post(sessions::create))
        .route(
            "/sessions/{id}",
            get(sessions::show)
                .put(sessions::update)
                .patch(sessions::update)
                .delete(sessions::delete),
        )
        .route(
            "/sessions/{id}/",
            get(sessions::show)
                .put(sessions::update)
                .patch(sessions::update)
                .delete(sessions::delete),
        )
        .with_state(sessions_state)
        // Exercise routes
        .route("/exercises", get(exercises::list).post(exercises::create))
        .route("/exercises/", get(exercises::list).post(exercises::create))
        .route(
            "/exercises/{id}",
            get(exercises::show)
                .put(exercises::update)
                .patch(exercises::update)
                .delete(exercises::delete),
        )
        .route(
            "/exercises/{id}/",
            get(exercises::show)
                .put(exercises::update)
                .patch(exercises::update)
                .delete(exercises::delete),
        )
        .with_state(exercises_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
