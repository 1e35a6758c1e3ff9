use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::auth::role::RoleClaim;
use crate::error::LeaveError;
use crate::leave::LeaveService;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};

#[derive(Deserialize, ToSchema)]
pub struct ApplyLeave {
    #[schema(example = 1000)]
    pub employee_id: i64,
    #[schema(example = "2026-02-10", format = "date", value_type = String)]
    pub start_date: chrono::NaiveDate,
    #[schema(example = "2026-02-12", format = "date", value_type = String)]
    pub end_date: chrono::NaiveDate,
    #[schema(example = "family trip")]
    pub reason: String,
}

#[derive(Deserialize, ToSchema)]
pub struct DecideLeave {
    /// Target status: "approved" or "rejected"
    #[schema(example = "approved")]
    pub status: String,
}

/* =========================
Apply for leave
========================= */
#[utoipa::path(
    post,
    path = "/api/leaves",
    request_body(
        content = ApplyLeave,
        description = "Leave application payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted",
         body = Object,
         example = json!({
            "message": "Leave request submitted",
            "leave_id": 1,
            "status": "pending"
         })
        ),
        (status = 400, description = "Invalid dates, overlap, or insufficient balance"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Leave"
)]
pub async fn apply_leave(
    svc: web::Data<LeaveService>,
    payload: web::Json<ApplyLeave>,
) -> Result<impl Responder, LeaveError> {
    let leave_id = svc
        .apply_for_leave(
            payload.employee_id,
            payload.start_date,
            payload.end_date,
            &payload.reason,
        )
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave request submitted",
        "leave_id": leave_id,
        "status": "pending"
    })))
}

/* =========================
Decide leave (HR)
========================= */
#[utoipa::path(
    put,
    path = "/api/leaves/{leave_id}",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request to decide"),
        ("role" = Option<String>, Query, description = "Caller-asserted role, must be 'hr'")
    ),
    request_body = DecideLeave,
    responses(
        (status = 200, description = "Decision applied", body = Object, example = json!({
            "message": "Leave approved"
        })),
        (status = 400, description = "Already processed, bad status, or insufficient balance"),
        (status = 403, description = "Caller is not HR"),
        (status = 404, description = "Leave request not found")
    ),
    tag = "Leave"
)]
pub async fn decide_leave(
    claim: RoleClaim,
    svc: web::Data<LeaveService>,
    path: web::Path<i64>,
    payload: web::Json<DecideLeave>,
) -> Result<impl Responder, LeaveError> {
    let new_status = payload
        .status
        .parse::<LeaveStatus>()
        .map_err(|_| LeaveError::InvalidStatus)?;

    let applied = svc.decide(claim.role, path.into_inner(), new_status).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Leave {}", applied)
    })))
}

/* =========================
Get one leave request
========================= */
#[utoipa::path(
    get,
    path = "/api/leaves/{leave_id}",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "leave request not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    svc: web::Data<LeaveService>,
    path: web::Path<i64>,
) -> Result<impl Responder, LeaveError> {
    let leave = svc.get_leave(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(leave))
}
