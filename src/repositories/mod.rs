//! Storage seams.
//!
//! Stores work on a borrowed connection so the caller owns the unit of
//! work: a plain pooled connection for reads, a transaction for the
//! multi-row session writes.

use rusqlite::Connection;

use crate::error::Result;
use crate::models::{Exercise, Session};

pub mod exercise_repo;
pub mod session_repo;

pub use exercise_repo::ExerciseRepository;
pub use session_repo::SessionRepository;

pub trait SessionStore: Clone + Send + Sync + 'static {
    fn get(&self, conn: &Connection, id: &str) -> Result<Option<Session>>;

    /// All sessions, most recent `date` first.
    fn list(&self, conn: &Connection) -> Result<Vec<Session>>;

    fn insert(&self, conn: &Connection, session: &Session) -> Result<()>;

    /// Overwrite every column of an existing row. Returns `false` if no row matched.
    fn update(&self, conn: &Connection, session: &Session) -> Result<bool>;

    /// Delete a session; its exercises go with it.
    fn delete(&self, conn: &Connection, id: &str) -> Result<bool>;
}

pub trait ExerciseStore: Clone + Send + Sync + 'static {
    fn get(&self, conn: &Connection, id: &str) -> Result<Option<Exercise>>;

    fn list(&self, conn: &Connection) -> Result<Vec<Exercise>>;

    /// Exercises owned by one session, in payload order.
    fn list_for_session(&self, conn: &Connection, session_id: &str) -> Result<Vec<Exercise>>;

    fn insert(&self, conn: &Connection, exercise: &Exercise) -> Result<()>;

    fn update(&self, conn: &Connection, exercise: &Exercise) -> Result<bool>;

    fn delete(&self, conn: &Connection, id: &str) -> Result<bool>;

    /// Remove every exercise of a session. Returns the number removed.
    fn delete_for_session(&self, conn: &Connection, session_id: &str) -> Result<usize>;

    /// Position for an exercise appended to the end of a session.
    fn next_position(&self, conn: &Connection, session_id: &str) -> Result<i64>;
}
