use rusqlite::{Connection, OptionalExtension};

use super::ExerciseStore;
use crate::error::Result;
use crate::models::{Exercise, FromSqliteRow};

#[derive(Clone, Copy, Debug, Default)]
pub struct ExerciseRepository;

impl ExerciseStore for ExerciseRepository {
    fn get(&self, conn: &Connection, id: &str) -> Result<Option<Exercise>> {
        let mut stmt = conn.prepare("SELECT * FROM exercises WHERE id = ?")?;
        let result = stmt.query_row([id], Exercise::from_row).optional()?;
        Ok(result)
    }

    fn list(&self, conn: &Connection) -> Result<Vec<Exercise>> {
        let mut stmt = conn.prepare("SELECT * FROM exercises ORDER BY created_at, position")?;
        let exercises = stmt
            .query_map([], Exercise::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(exercises)
    }

    fn list_for_session(&self, conn: &Connection, session_id: &str) -> Result<Vec<Exercise>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM exercises WHERE session_id = ? ORDER BY position, created_at",
        )?;
        let exercises = stmt
            .query_map([session_id], Exercise::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(exercises)
    }

    fn insert(&self, conn: &Connection, exercise: &Exercise) -> Result<()> {
        conn.execute(
            "INSERT INTO exercises (id, session_id, position, name, type, sets, reps, weight,
                                    duration, distance, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            rusqlite::params![
                exercise.id,
                exercise.session_id,
                exercise.position,
                exercise.name,
                exercise.exercise_type,
                exercise.sets,
                exercise.reps,
                exercise.weight,
                exercise.duration,
                exercise.distance,
                exercise.notes,
                exercise.created_at,
                exercise.updated_at
            ],
        )?;
        Ok(())
    }

    fn update(&self, conn: &Connection, exercise: &Exercise) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE exercises
             SET name = ?, type = ?, sets = ?, reps = ?, weight = ?, duration = ?,
                 distance = ?, notes = ?, updated_at = ?
             WHERE id = ?",
            rusqlite::params![
                exercise.name,
                exercise.exercise_type,
                exercise.sets,
                exercise.reps,
                exercise.weight,
                exercise.duration,
                exercise.distance,
                exercise.notes,
                exercise.updated_at,
                exercise.id
            ],
        )?;
        Ok(rows > 0)
    }

    fn delete(&self, conn: &Connection, id: &str) -> Result<bool> {
        let rows = conn.execute("DELETE FROM exercises WHERE id = ?", [id])?;
        Ok(rows > 0)
    }

    fn delete_for_session(&self, conn: &Connection, session_id: &str) -> Result<usize> {
        let rows = conn.execute("DELETE FROM exercises WHERE session_id = ?", [session_id])?;
        Ok(rows)
    }

    fn next_position(&self, conn: &Connection, session_id: &str) -> Result<i64> {
        let position: i64 = conn.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM exercises WHERE session_id = ?",
            [session_id],
            |row| row.get(0),
        )?;
        Ok(position)
    }
}
