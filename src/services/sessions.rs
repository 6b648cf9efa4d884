use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::{self, DbPool};
use crate::error::{AppError, Result};
use crate::models::{
    CreateSession, Exercise, NewExercise, Session, SessionDetail, SessionUpdate,
};
use crate::repositories::{ExerciseRepository, ExerciseStore, SessionRepository, SessionStore};

/// Session reads and writes, including the nested exercise list.
///
/// Create and update touch the session row and its exercises inside a
/// single transaction, so a failed child write leaves nothing behind.
#[derive(Clone)]
pub struct SessionService<S = SessionRepository, E = ExerciseRepository> {
    pool: DbPool,
    sessions: S,
    exercises: E,
}

impl SessionService {
    pub fn new(pool: DbPool) -> Self {
        Self::with_stores(pool, SessionRepository, ExerciseRepository)
    }
}

impl<S: SessionStore, E: ExerciseStore> SessionService<S, E> {
    pub fn with_stores(pool: DbPool, sessions: S, exercises: E) -> Self {
        Self {
            pool,
            sessions,
            exercises,
        }
    }

    pub async fn list(&self) -> Result<Vec<SessionDetail>> {
        let sessions = self.sessions.clone();
        let exercises = self.exercises.clone();
        // One transaction so both reads see the same snapshot.
        db::transaction(&self.pool, move |conn| {
            let mut by_session: HashMap<String, Vec<Exercise>> = HashMap::new();
            for exercise in exercises.list(conn)? {
                by_session
                    .entry(exercise.session_id.clone())
                    .or_default()
                    .push(exercise);
            }

            let details = sessions
                .list(conn)?
                .into_iter()
                .map(|session| {
                    let mut exercises = by_session.remove(&session.id).unwrap_or_default();
                    exercises.sort_by_key(|e| e.position);
                    SessionDetail { session, exercises }
                })
                .collect();
            Ok(details)
        })
        .await
    }

    pub async fn get(&self, id: &str) -> Result<SessionDetail> {
        let sessions = self.sessions.clone();
        let exercises = self.exercises.clone();
        let id = id.to_string();
        db::run(&self.pool, move |conn| {
            load_detail(conn, &sessions, &exercises, &id)?.ok_or_else(session_not_found)
        })
        .await
    }

    pub async fn create(&self, input: CreateSession) -> Result<SessionDetail> {
        input.validate()?;

        let sessions = self.sessions.clone();
        let exercises = self.exercises.clone();
        let detail = db::transaction(&self.pool, move |conn| {
            let now = Utc::now();
            let session = Session {
                id: Uuid::new_v4().to_string(),
                name: input.name,
                date: input.date,
                duration: input.duration,
                rating: input.rating,
                notes: input.notes,
                created_at: now,
                updated_at: now,
            };
            sessions.insert(conn, &session)?;

            let exercises = insert_exercises(conn, &exercises, &session.id, input.exercises, now)?;
            Ok(SessionDetail { session, exercises })
        })
        .await?;

        tracing::info!(
            "Created session {} with {} exercises",
            detail.session.id,
            detail.exercises.len()
        );
        Ok(detail)
    }

    /// Apply scalar changes and, for [`SessionUpdate::ScalarsAndExercises`],
    /// replace the whole exercise list. Replaced exercises get new ids.
    pub async fn update(&self, id: &str, update: SessionUpdate) -> Result<SessionDetail> {
        update.validate()?;

        let sessions = self.sessions.clone();
        let exercises = self.exercises.clone();
        let id = id.to_string();
        let detail = db::transaction(&self.pool, move |conn| {
            let mut session = sessions.get(conn, &id)?.ok_or_else(session_not_found)?;
            let now = Utc::now();

            let replacement = match update {
                SessionUpdate::ScalarsOnly(changes) => {
                    changes.apply(&mut session);
                    None
                }
                SessionUpdate::ScalarsAndExercises(changes, list) => {
                    changes.apply(&mut session);
                    Some(list)
                }
            };
            session.updated_at = now;
            sessions.update(conn, &session)?;

            let exercises = match replacement {
                Some(list) => {
                    let removed = exercises.delete_for_session(conn, &session.id)?;
                    tracing::debug!("Replacing {} exercises of session {}", removed, session.id);
                    insert_exercises(conn, &exercises, &session.id, list, now)?
                }
                None => exercises.list_for_session(conn, &session.id)?,
            };
            Ok(SessionDetail { session, exercises })
        })
        .await?;

        tracing::info!("Updated session {}", detail.session.id);
        Ok(detail)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let sessions = self.sessions.clone();
        let id = id.to_string();
        let deleted = db::run(&self.pool, {
            let id = id.clone();
            move |conn| sessions.delete(conn, &id)
        })
        .await?;

        if !deleted {
            return Err(session_not_found());
        }
        tracing::info!("Deleted session {}", id);
        Ok(())
    }
}

fn session_not_found() -> AppError {
    AppError::NotFound("Session not found".to_string())
}

fn load_detail<S: SessionStore, E: ExerciseStore>(
    conn: &Connection,
    sessions: &S,
    exercises: &E,
    id: &str,
) -> Result<Option<SessionDetail>> {
    let Some(session) = sessions.get(conn, id)? else {
        return Ok(None);
    };
    let exercises = exercises.list_for_session(conn, &session.id)?;
    Ok(Some(SessionDetail { session, exercises }))
}

fn insert_exercises<E: ExerciseStore>(
    conn: &Connection,
    store: &E,
    session_id: &str,
    list: Vec<NewExercise>,
    now: DateTime<Utc>,
) -> Result<Vec<Exercise>> {
    list.into_iter()
        .enumerate()
        .map(|(position, input)| {
            let exercise = Exercise::new(session_id, position as i64, input, now);
            store.insert(conn, &exercise)?;
            Ok(exercise)
        })
        .collect()
}
