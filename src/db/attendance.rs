use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::model::attendance::Attendance;

pub async fn insert(
    pool: &SqlitePool,
    user_id: i64,
    date: NaiveDate,
    status: &str,
) -> Result<Attendance, sqlx::Error> {
    sqlx::query_as::<_, Attendance>(
        r#"
        INSERT INTO attendance (user_id, date, status)
        VALUES (?, ?, ?)
        RETURNING id, user_id, date, status
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(status)
    .fetch_one(pool)
    .await
}

/// Insertion order.
pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Attendance>, sqlx::Error> {
    sqlx::query_as::<_, Attendance>(
        "SELECT id, user_id, date, status FROM attendance WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
