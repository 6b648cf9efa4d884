use chrono::Utc;

use crate::db::{self, DbPool};
use crate::error::{AppError, Result};
use crate::models::{CreateExercise, Exercise, UpdateExercise};
use crate::repositories::{ExerciseRepository, ExerciseStore, SessionRepository, SessionStore};

/// Single-exercise access, addressed by id.
#[derive(Clone)]
pub struct ExerciseService<S = SessionRepository, E = ExerciseRepository> {
    pool: DbPool,
    sessions: S,
    exercises: E,
}

impl ExerciseService {
    pub fn new(pool: DbPool) -> Self {
        Self::with_stores(pool, SessionRepository, ExerciseRepository)
    }
}

impl<S: SessionStore, E: ExerciseStore> ExerciseService<S, E> {
    pub fn with_stores(pool: DbPool, sessions: S, exercises: E) -> Self {
        Self {
            pool,
            sessions,
            exercises,
        }
    }

    pub async fn list(&self) -> Result<Vec<Exercise>> {
        let exercises = self.exercises.clone();
        db::run(&self.pool, move |conn| exercises.list(conn)).await
    }

    pub async fn get(&self, id: &str) -> Result<Exercise> {
        let exercises = self.exercises.clone();
        let id = id.to_string();
        db::run(&self.pool, move |conn| {
            exercises.get(conn, &id)?.ok_or_else(exercise_not_found)
        })
        .await
    }

    /// Append an exercise to an existing session.
    pub async fn create(&self, input: CreateExercise) -> Result<Exercise> {
        input.exercise.validate()?;

        let sessions = self.sessions.clone();
        let exercises = self.exercises.clone();
        let exercise = db::transaction(&self.pool, move |conn| {
            if sessions.get(conn, &input.session_id)?.is_none() {
                return Err(invalid_session(&input.session_id));
            }

            let position = exercises.next_position(conn, &input.session_id)?;
            let exercise = Exercise::new(&input.session_id, position, input.exercise, Utc::now());
            exercises.insert(conn, &exercise)?;
            Ok(exercise)
        })
        .await?;

        tracing::info!(
            "Created exercise {} in session {}",
            exercise.id,
            exercise.session_id
        );
        Ok(exercise)
    }

    pub async fn update(&self, id: &str, input: UpdateExercise) -> Result<Exercise> {
        input.validate()?;

        let sessions = self.sessions.clone();
        let exercises = self.exercises.clone();
        let id = id.to_string();
        let exercise = db::transaction(&self.pool, move |conn| {
            let mut exercise = exercises.get(conn, &id)?.ok_or_else(exercise_not_found)?;

            // Naming the current owner is accepted; exercises never move.
            if let Some(Some(session_id)) = &input.session_id {
                if *session_id != exercise.session_id {
                    if sessions.get(conn, session_id)?.is_none() {
                        return Err(invalid_session(session_id));
                    }
                    return Err(AppError::Validation(
                        "session: An exercise cannot be moved to another session.".to_string(),
                    ));
                }
            }

            input.apply(&mut exercise);
            exercise.updated_at = Utc::now();
            exercises.update(conn, &exercise)?;
            Ok(exercise)
        })
        .await?;

        tracing::info!("Updated exercise {}", exercise.id);
        Ok(exercise)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let exercises = self.exercises.clone();
        let id = id.to_string();
        let deleted = db::run(&self.pool, {
            let id = id.clone();
            move |conn| exercises.delete(conn, &id)
        })
        .await?;

        if !deleted {
            return Err(exercise_not_found());
        }
        tracing::info!("Deleted exercise {}", id);
        Ok(())
    }
}

fn exercise_not_found() -> AppError {
    AppError::NotFound("Exercise not found".to_string())
}

fn invalid_session(session_id: &str) -> AppError {
    AppError::Validation(format!(
        "session: Invalid session \"{}\" - object does not exist.",
        session_id
    ))
}
