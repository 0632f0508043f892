use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub mod attendance;
pub mod leave_request;
pub mod payroll;
pub mod session;
pub mod user;

/// Initial table creation. There are no migrations beyond this.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT    NOT NULL UNIQUE COLLATE NOCASE,
        password TEXT    NOT NULL,
        role     TEXT    NOT NULL DEFAULT 'employee' CHECK (role IN ('employee', 'admin'))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendance (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users (id),
        date    TEXT    NOT NULL,
        status  TEXT    NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leave_requests (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id    INTEGER NOT NULL REFERENCES users (id),
        start_date TEXT    NOT NULL,
        end_date   TEXT    NOT NULL,
        status     TEXT    NOT NULL DEFAULT 'Pending'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS payroll (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id  INTEGER NOT NULL REFERENCES users (id),
        salary   REAL    NOT NULL,
        pay_date TEXT    NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sessions (
        jti        TEXT    PRIMARY KEY,
        user_id    INTEGER NOT NULL REFERENCES users (id),
        expires_at INTEGER NOT NULL,
        revoked    INTEGER NOT NULL DEFAULT 0
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_attendance_user ON attendance (user_id)",
    "CREATE INDEX IF NOT EXISTS idx_leave_requests_user ON leave_requests (user_id)",
    "CREATE INDEX IF NOT EXISTS idx_payroll_user ON payroll (user_id)",
];

pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new().connect_with(options).await
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// SQLite reports UNIQUE and PRIMARY KEY conflicts through the same kind.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
