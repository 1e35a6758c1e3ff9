use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Domain errors for employee registration and leave processing.
///
/// Every variant is caller-correctable; `Storage` is the one transient
/// class a caller may retry wholesale.
#[derive(Error, Debug)]
pub enum LeaveError {
    /// Email is already registered to another employee
    #[error("email already registered")]
    DuplicateEmail,

    /// Referenced employee ID does not exist
    #[error("employee not found")]
    EmployeeNotFound,

    /// Referenced leave request ID does not exist
    #[error("leave request not found")]
    LeaveNotFound,

    /// end_date is before start_date
    #[error("end_date cannot be before start_date")]
    InvalidRange,

    /// Leave starts before the employee's joining date
    #[error("leave cannot start before joining date")]
    BeforeJoining,

    /// Dates intersect an existing pending or approved request
    #[error("leave dates overlap an existing request")]
    Overlap,

    /// Requested days exceed the current leave balance
    #[error("insufficient leave balance")]
    InsufficientBalance,

    /// Request is already approved or rejected
    #[error("leave request already processed")]
    AlreadyFinalized,

    /// Target status is not approved or rejected
    #[error("status must be approved or rejected")]
    InvalidStatus,

    /// Caller-asserted role lacks the required capability
    #[error("HR role required")]
    Forbidden,

    /// Storage failure; safe to retry the whole operation
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ResponseError for LeaveError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeaveError::DuplicateEmail => StatusCode::CONFLICT,
            LeaveError::EmployeeNotFound | LeaveError::LeaveNotFound => StatusCode::NOT_FOUND,
            LeaveError::InvalidRange
            | LeaveError::BeforeJoining
            | LeaveError::Overlap
            | LeaveError::InsufficientBalance
            | LeaveError::AlreadyFinalized
            | LeaveError::InvalidStatus => StatusCode::BAD_REQUEST,
            LeaveError::Forbidden => StatusCode::FORBIDDEN,
            LeaveError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let LeaveError::Storage(e) = self {
            tracing::error!(error = %e, "storage failure");
        }
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
