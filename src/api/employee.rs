use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::auth::role::RoleClaim;
use crate::error::LeaveError;
use crate::leave::LeaveService;
use crate::leave::service::BalanceSummary;
use crate::model::employee::{Employee, Role};
use crate::model::leave_request::LeaveRequest;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john@email.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub joining_date: chrono::NaiveDate,
    /// Role of the new employee record itself, not of the caller
    #[schema(example = "employee")]
    pub role: Role,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmployeeQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub department: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    #[schema(example = json!([{
        "id": 1,
        "name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering",
        "joining_date": "2024-01-01",
        "role": "employee",
        "leave_balance": 20
    }]))]
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 10)]
    pub total: i64,
}

/* =========================
Create employee (HR)
========================= */
#[utoipa::path(
    post,
    path = "/api/employees",
    params(
        ("role" = Option<String>, Query, description = "Caller-asserted role, must be 'hr'")
    ),
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee registered", body = Object, example = json!({
            "message": "Employee registered",
            "id": 1
        })),
        (status = 403, description = "Caller is not HR"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    claim: RoleClaim,
    svc: web::Data<LeaveService>,
    payload: web::Json<CreateEmployee>,
) -> Result<impl Responder, LeaveError> {
    let id = svc
        .add_employee(
            claim.role,
            &payload.name,
            &payload.email,
            &payload.department,
            payload.joining_date,
            payload.role,
        )
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee registered",
        "id": id
    })))
}

/* =========================
List employees (HR)
========================= */
#[utoipa::path(
    get,
    path = "/api/employees",
    params(
        ("role" = Option<String>, Query, description = "Caller-asserted role, must be 'hr'"),
        ("page" = Option<u32>, Query, description = "Page number (start with 1)"),
        ("per_page" = Option<u32>, Query, description = "Items per page"),
        ("department" = Option<String>, Query, description = "Filter by department")
    ),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse),
        (status = 403, description = "Caller is not HR")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    claim: RoleClaim,
    svc: web::Data<LeaveService>,
    query: web::Query<EmployeeQuery>,
) -> Result<impl Responder, LeaveError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let (employees, total) = svc
        .list_employees(claim.role, page, per_page, query.department.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data: employees,
        page,
        per_page,
        total,
    }))
}

/* =========================
Get employee by ID
========================= */
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    svc: web::Data<LeaveService>,
    path: web::Path<i64>,
) -> Result<impl Responder, LeaveError> {
    let employee = svc.get_employee(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/* =========================
Leave balance
========================= */
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}/balance",
    params(
        ("employee_id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Current balance", body = BalanceSummary),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_balance(
    svc: web::Data<LeaveService>,
    path: web::Path<i64>,
) -> Result<impl Responder, LeaveError> {
    let summary = svc.get_balance(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/* =========================
Leave history for one employee
========================= */
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}/leaves",
    params(
        ("employee_id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "All leave requests for the employee, oldest first",
         body = [LeaveRequest]),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn employee_leaves(
    svc: web::Data<LeaveService>,
    path: web::Path<i64>,
) -> Result<impl Responder, LeaveError> {
    let leaves = svc.list_leaves(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(leaves))
}
