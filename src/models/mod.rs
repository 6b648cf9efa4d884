use rusqlite::Row;

pub mod exercise;
pub mod fields;
pub mod session;

pub use exercise::{CreateExercise, Exercise, ExerciseType, NewExercise, UpdateExercise};
pub use session::{
    CreateSession, Session, SessionChanges, SessionDetail, SessionUpdate, UpdateSession,
};

/// Build a model from a `SELECT *` row of its table.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
