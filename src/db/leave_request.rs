use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::model::leave_request::{LeaveRequest, LeaveStatus};

pub async fn insert(
    pool: &SqlitePool,
    user_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<LeaveRequest, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(
        r#"
        INSERT INTO leave_requests (user_id, start_date, end_date, status)
        VALUES (?, ?, ?, ?)
        RETURNING id, user_id, start_date, end_date, status
        "#,
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .bind(LeaveStatus::Pending.as_ref())
    .fetch_one(pool)
    .await
}

pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(
        r#"
        SELECT id, user_id, start_date, end_date, status
        FROM leave_requests
        WHERE user_id = ?
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
