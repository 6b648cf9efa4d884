use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

use crate::error::{AppError, Result};

pub type DbPool = Pool<SqliteConnectionManager>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// Cascade deletes and the exercise -> session reference rely on foreign keys.
// Writers queue on the busy timeout instead of failing with SQLITE_BUSY.
fn configure_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}

pub fn create_pool(database_url: &str) -> std::result::Result<DbPool, r2d2::Error> {
    let path = database_url.strip_prefix("sqlite:").unwrap_or(database_url);
    // Remove query parameters (e.g., ?mode=rwc)
    let path = path.split('?').next().unwrap_or(path);

    let manager = if path == ":memory:" {
        SqliteConnectionManager::memory()
    } else {
        SqliteConnectionManager::file(Path::new(path))
    };

    Pool::builder()
        .max_size(5)
        .build(manager.with_init(configure_connection))
}

pub fn create_memory_pool() -> std::result::Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::memory().with_init(configure_connection);
    Pool::builder().max_size(1).build(manager)
}

/// Run `f` against a pooled connection on the blocking thread pool.
pub async fn run<T, F>(pool: &DbPool, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let conn = pool.get()?;
        f(&conn)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?
}

/// Like [`run`], but everything `f` does is committed as one SQLite
/// transaction. Any error rolls the whole unit back.
///
/// The transaction is `IMMEDIATE`: the write lock is taken up front, so a
/// read-then-write sequence never has to upgrade a shared lock.
pub async fn transaction<T, F>(pool: &DbPool, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_pool_enables_foreign_keys() {
        let pool = create_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn test_transaction_rolls_back_on_error() {
        let pool = create_memory_pool().unwrap();
        run(&pool, |conn| {
            conn.execute_batch("CREATE TABLE t (v INTEGER)")?;
            Ok(())
        })
        .await
        .unwrap();

        let result: Result<()> = transaction(&pool, |conn| {
            conn.execute("INSERT INTO t (v) VALUES (1)", [])?;
            Err(AppError::Internal("boom".to_string()))
        })
        .await;
        assert!(result.is_err());

        let count: i64 = run(&pool, |conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))?)
        })
        .await
        .unwrap();
        assert_eq!(count, 0);
    }
}
