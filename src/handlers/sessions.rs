use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::error::Result;
use crate::models::{CreateSession, SessionDetail, UpdateSession};
use crate::services::SessionService;

#[derive(Clone)]
pub struct SessionsState {
    pub session_service: SessionService,
}

pub async fn list(State(state): State<SessionsState>) -> Result<Json<Vec<SessionDetail>>> {
    let sessions = state.session_service.list().await?;
    Ok(Json(sessions))
}

pub async fn create(
    State(state): State<SessionsState>,
    payload: std::result::Result<Json<CreateSession>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionDetail>)> {
    let Json(input) = payload?;
    let session = state.session_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn show(
    State(state): State<SessionsState>,
    Path(id): Path<String>,
) -> Result<Json<SessionDetail>> {
    let session = state.session_service.get(&id).await?;
    Ok(Json(session))
}

/// PUT and PATCH: fields left out of the body keep their values, and the
/// exercise list is only replaced when `exercises` is present.
pub async fn update(
    State(state): State<SessionsState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateSession>, JsonRejection>,
) -> Result<Json<SessionDetail>> {
    let Json(input) = payload?;
    let session = state
        .session_service
        .update(&id, input.into_update()?)
        .await?;
    Ok(Json(session))
}

pub async fn delete(
    State(state): State<SessionsState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.session_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
