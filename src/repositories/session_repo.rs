use rusqlite::{Connection, OptionalExtension};

use super::SessionStore;
use crate::error::Result;
use crate::models::{FromSqliteRow, Session};

#[derive(Clone, Copy, Debug, Default)]
pub struct SessionRepository;

impl SessionStore for SessionRepository {
    fn get(&self, conn: &Connection, id: &str) -> Result<Option<Session>> {
        let mut stmt = conn.prepare("SELECT * FROM sessions WHERE id = ?")?;
        let result = stmt.query_row([id], Session::from_row).optional()?;
        Ok(result)
    }

    fn list(&self, conn: &Connection) -> Result<Vec<Session>> {
        let mut stmt =
            conn.prepare("SELECT * FROM sessions ORDER BY date DESC, created_at DESC")?;
        let sessions = stmt
            .query_map([], Session::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sessions)
    }

    fn insert(&self, conn: &Connection, session: &Session) -> Result<()> {
        conn.execute(
            "INSERT INTO sessions (id, name, date, duration, rating, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            rusqlite::params![
                session.id,
                session.name,
                session.date,
                session.duration,
                session.rating,
                session.notes,
                session.created_at,
                session.updated_at
            ],
        )?;
        Ok(())
    }

    fn update(&self, conn: &Connection, session: &Session) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE sessions
             SET name = ?, date = ?, duration = ?, rating = ?, notes = ?, updated_at = ?
             WHERE id = ?",
            rusqlite::params![
                session.name,
                session.date,
                session.duration,
                session.rating,
                session.notes,
                session.updated_at,
                session.id
            ],
        )?;
        Ok(rows > 0)
    }

    fn delete(&self, conn: &Connection, id: &str) -> Result<bool> {
        let rows = conn.execute("DELETE FROM sessions WHERE id = ?", [id])?;
        Ok(rows > 0)
    }
}
