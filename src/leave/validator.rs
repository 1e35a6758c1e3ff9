//! Pure decision logic for leave applications and status transitions.
//!
//! Nothing here touches the store; callers load state, ask for a decision,
//! then persist it inside their own transaction.

use chrono::NaiveDate;

use crate::error::LeaveError;
use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};

/// An accepted application, ready to be inserted in `pending` status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveDraft {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i64,
}

/// The single permitted state change for a pending request. The balance
/// delta only exists on the `Approve` arm, so a balance mutation cannot
/// accompany any other status write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Approve { balance_delta: i64 },
    Reject,
}

/// Closed-interval intersection: [s1, e1] and [s2, e2] overlap iff
/// s1 <= e2 and s2 <= e1.
fn ranges_overlap(s1: NaiveDate, e1: NaiveDate, s2: NaiveDate, e2: NaiveDate) -> bool {
    s1 <= e2 && s2 <= e1
}

/// Inclusive day count of [start, end]. Caller guarantees end >= start.
fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Decide whether `employee` may apply for leave over [start, end].
///
/// The balance check here is advisory: balance is only spent at approval,
/// and `validate_transition` re-checks it authoritatively.
pub fn validate_application(
    employee: &Employee,
    existing: &[LeaveRequest],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<LeaveDraft, LeaveError> {
    if end < start {
        return Err(LeaveError::InvalidRange);
    }

    if start < employee.joining_date {
        return Err(LeaveError::BeforeJoining);
    }

    let days = inclusive_days(start, end);

    // Rejected requests free their dates; pending and approved block them.
    let conflict = existing
        .iter()
        .filter(|r| r.status.blocks_dates())
        .any(|r| ranges_overlap(start, end, r.start_date, r.end_date));
    if conflict {
        return Err(LeaveError::Overlap);
    }

    if days > employee.leave_balance {
        return Err(LeaveError::InsufficientBalance);
    }

    Ok(LeaveDraft {
        start_date: start,
        end_date: end,
        days,
    })
}

/// Decide whether a pending request may move to `new_status`.
pub fn validate_transition(
    request: &LeaveRequest,
    employee: &Employee,
    new_status: LeaveStatus,
) -> Result<Transition, LeaveError> {
    if request.status.is_terminal() {
        return Err(LeaveError::AlreadyFinalized);
    }

    match new_status {
        LeaveStatus::Approved => {
            // Balance may have been consumed by another approval since the
            // application-time check; this one is authoritative.
            if request.days > employee.leave_balance {
                return Err(LeaveError::InsufficientBalance);
            }
            Ok(Transition::Approve {
                balance_delta: -request.days,
            })
        }
        LeaveStatus::Rejected => Ok(Transition::Reject),
        LeaveStatus::Pending => Err(LeaveError::InvalidStatus),
    }
}
