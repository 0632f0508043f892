use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Payroll {
    pub id: i64,
    pub user_id: i64,
    pub salary: f64,
    pub pay_date: NaiveDate,
}
