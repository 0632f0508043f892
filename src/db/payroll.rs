use sqlx::SqlitePool;

use crate::model::payroll::Payroll;

pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Payroll>, sqlx::Error> {
    sqlx::query_as::<_, Payroll>(
        "SELECT id, user_id, salary, pay_date FROM payroll WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
