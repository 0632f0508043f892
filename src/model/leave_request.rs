use chrono::NaiveDate;
use serde::Serialize;
use strum_macros::{AsRefStr, EnumString};

/// Nothing in the portal moves a request out of `Pending` yet.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, EnumString, AsRefStr)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl TryFrom<String> for LeaveStatus {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LeaveRequest {
    pub id: i64,
    pub user_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: LeaveStatus,
}
