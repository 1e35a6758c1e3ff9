use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Workflow status of a leave request. `pending` is the only state a
/// request can leave; `approved` and `rejected` are terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema, Default)]
#[derive(strum_macros::Display, strum_macros::EnumString)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LeaveStatus::Approved | LeaveStatus::Rejected)
    }

    /// Statuses that occupy calendar dates for overlap purposes.
    pub fn blocks_dates(&self) -> bool {
        matches!(self, LeaveStatus::Pending | LeaveStatus::Approved)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 1000)]
    pub employee_id: i64,
    #[schema(example = "2026-02-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-02-12", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "family trip")]
    pub reason: String,
    #[schema(example = "pending")]
    pub status: LeaveStatus,
    #[schema(example = 3)]
    pub days: i64,
    #[schema(example = "2026-01-01T00:00:00", format = "date-time", value_type = String)]
    pub created_at: NaiveDateTime,
}
