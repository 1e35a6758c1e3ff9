//! Transaction orchestration around the validator.
//!
//! Every state-changing operation runs inside one `sqlx` transaction:
//! load, validate, write, commit. An early `?` return drops the
//! transaction and sqlx rolls it back, so the status/balance pair can
//! never be observed torn.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

use crate::error::LeaveError;
use crate::leave::validator::{self, Transition};
use crate::model::employee::{Employee, Role};
use crate::model::leave_request::{LeaveRequest, LeaveStatus};

#[derive(Clone)]
pub struct LeaveService {
    pool: SqlitePool,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct BalanceSummary {
    #[schema(example = 1000)]
    pub employee_id: i64,
    #[schema(example = "John Doe")]
    pub employee: String,
    #[schema(example = 17)]
    pub leave_balance: i64,
}

impl LeaveService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new employee with the starting balance of 20 days.
    /// Requires the `hr` capability.
    pub async fn add_employee(
        &self,
        claim: Role,
        name: &str,
        email: &str,
        department: &str,
        joining_date: NaiveDate,
        role: Role,
    ) -> Result<i64, LeaveError> {
        if claim != Role::Hr {
            return Err(LeaveError::Forbidden);
        }

        let mut tx = self.pool.begin().await?;

        // Exact-match duplicate check; the UNIQUE column is the backstop.
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM employees WHERE email = ?")
            .bind(email)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(LeaveError::DuplicateEmail);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO employees (name, email, department, joining_date, role, leave_balance)
            VALUES (?, ?, ?, ?, ?, 20)
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(department)
        .bind(joining_date)
        .bind(role)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();
        tx.commit().await?;

        info!(employee_id = id, "employee registered");
        Ok(id)
    }

    /// Record a new leave application in `pending` status.
    ///
    /// Load, validation and insert share one transaction so a concurrent
    /// overlapping application cannot slip past a stale read.
    pub async fn apply_for_leave(
        &self,
        employee_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        reason: &str,
    ) -> Result<i64, LeaveError> {
        let mut tx = self.pool.begin().await?;

        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
            .bind(employee_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(LeaveError::EmployeeNotFound)?;

        let existing =
            sqlx::query_as::<_, LeaveRequest>("SELECT * FROM leave_requests WHERE employee_id = ?")
                .bind(employee_id)
                .fetch_all(&mut *tx)
                .await?;

        let draft = validator::validate_application(&employee, &existing, start, end)?;

        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests (employee_id, start_date, end_date, reason, status, days)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(employee_id)
        .bind(draft.start_date)
        .bind(draft.end_date)
        .bind(reason)
        .bind(LeaveStatus::Pending)
        .bind(draft.days)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();
        tx.commit().await?;

        info!(employee_id, leave_id = id, days = draft.days, "leave application recorded");
        Ok(id)
    }

    /// Transition a pending request to approved or rejected. Requires the
    /// `hr` capability, checked before any lookup.
    ///
    /// On approval the status write and the balance decrement commit
    /// together or not at all.
    pub async fn decide(
        &self,
        claim: Role,
        leave_id: i64,
        new_status: LeaveStatus,
    ) -> Result<LeaveStatus, LeaveError> {
        if claim != Role::Hr {
            return Err(LeaveError::Forbidden);
        }

        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, LeaveRequest>("SELECT * FROM leave_requests WHERE id = ?")
            .bind(leave_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(LeaveError::LeaveNotFound)?;

        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
            .bind(request.employee_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(LeaveError::EmployeeNotFound)?;

        let transition = validator::validate_transition(&request, &employee, new_status)?;

        match transition {
            Transition::Approve { balance_delta } => {
                sqlx::query("UPDATE leave_requests SET status = ? WHERE id = ?")
                    .bind(LeaveStatus::Approved)
                    .bind(leave_id)
                    .execute(&mut *tx)
                    .await?;
                sqlx::query("UPDATE employees SET leave_balance = leave_balance + ? WHERE id = ?")
                    .bind(balance_delta)
                    .bind(employee.id)
                    .execute(&mut *tx)
                    .await?;
            }
            Transition::Reject => {
                sqlx::query("UPDATE leave_requests SET status = ? WHERE id = ?")
                    .bind(LeaveStatus::Rejected)
                    .bind(leave_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        info!(leave_id, status = %new_status, "leave request decided");
        Ok(new_status)
    }

    pub async fn get_balance(&self, employee_id: i64) -> Result<BalanceSummary, LeaveError> {
        sqlx::query_as::<_, BalanceSummary>(
            "SELECT id AS employee_id, name AS employee, leave_balance FROM employees WHERE id = ?",
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(LeaveError::EmployeeNotFound)
    }

    /// All requests for one employee, in insertion order.
    pub async fn list_leaves(&self, employee_id: i64) -> Result<Vec<LeaveRequest>, LeaveError> {
        let known: Option<i64> = sqlx::query_scalar("SELECT id FROM employees WHERE id = ?")
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?;
        if known.is_none() {
            return Err(LeaveError::EmployeeNotFound);
        }

        let leaves = sqlx::query_as::<_, LeaveRequest>(
            "SELECT * FROM leave_requests WHERE employee_id = ? ORDER BY id",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(leaves)
    }

    pub async fn get_employee(&self, employee_id: i64) -> Result<Employee, LeaveError> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(LeaveError::EmployeeNotFound)
    }

    pub async fn get_leave(&self, leave_id: i64) -> Result<LeaveRequest, LeaveError> {
        sqlx::query_as::<_, LeaveRequest>("SELECT * FROM leave_requests WHERE id = ?")
            .bind(leave_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(LeaveError::LeaveNotFound)
    }

    /// Paginated employee listing with an optional department filter.
    /// Requires the `hr` capability.
    pub async fn list_employees(
        &self,
        claim: Role,
        page: u32,
        per_page: u32,
        department: Option<&str>,
    ) -> Result<(Vec<Employee>, i64), LeaveError> {
        if claim != Role::Hr {
            return Err(LeaveError::Forbidden);
        }

        let offset = (page.saturating_sub(1)) * per_page;

        let (count_sql, data_sql) = if department.is_some() {
            (
                "SELECT COUNT(*) FROM employees WHERE department = ?",
                "SELECT * FROM employees WHERE department = ? ORDER BY id LIMIT ? OFFSET ?",
            )
        } else {
            (
                "SELECT COUNT(*) FROM employees",
                "SELECT * FROM employees ORDER BY id LIMIT ? OFFSET ?",
            )
        };

        let mut count_q = sqlx::query_scalar::<_, i64>(count_sql);
        let mut data_q = sqlx::query_as::<_, Employee>(data_sql);
        if let Some(dept) = department {
            count_q = count_q.bind(dept);
            data_q = data_q.bind(dept);
        }

        let total = count_q.fetch_one(&self.pool).await?;
        let employees = data_q
            .bind(per_page as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok((employees, total))
    }
}
