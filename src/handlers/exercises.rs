use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::error::Result;
use crate::models::{CreateExercise, Exercise, UpdateExercise};
use crate::services::ExerciseService;

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_service: ExerciseService,
}

pub async fn list(State(state): State<ExercisesState>) -> Result<Json<Vec<Exercise>>> {
    let exercises = state.exercise_service.list().await?;
    Ok(Json(exercises))
}

pub async fn create(
    State(state): State<ExercisesState>,
    payload: std::result::Result<Json<CreateExercise>, JsonRejection>,
) -> Result<(StatusCode, Json<Exercise>)> {
    let Json(input) = payload?;
    let exercise = state.exercise_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

pub async fn show(
    State(state): State<ExercisesState>,
    Path(id): Path<String>,
) -> Result<Json<Exercise>> {
    let exercise = state.exercise_service.get(&id).await?;
    Ok(Json(exercise))
}

pub async fn update(
    State(state): State<ExercisesState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateExercise>, JsonRejection>,
) -> Result<Json<Exercise>> {
    let Json(input) = payload?;
    let exercise = state.exercise_service.update(&id, input).await?;
    Ok(Json(exercise))
}

pub async fn delete(
    State(state): State<ExercisesState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.exercise_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
