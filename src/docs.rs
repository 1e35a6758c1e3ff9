use crate::api::employee::{CreateEmployee, EmployeeListResponse, EmployeeQuery};
use crate::api::leave::{ApplyLeave, DecideLeave};
use crate::leave::service::BalanceSummary;
use crate::model::employee::{Employee, Role};
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LeaveDesk API",
        version = "1.0.0",
        description = r#"
## LeaveDesk

Small leave-tracking backend: register employees, apply for leave, and let
HR approve or reject requests with atomic balance deduction.

- **Employee Management** — register and list employees, check balances
- **Leave Management** — apply, approve/reject, view leave history

Role is a caller-asserted `?role=` query parameter; HR-only operations
refuse any other claim. Responses are JSON; list endpoints paginate.

Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave::apply_leave,
        crate::api::leave::decide_leave,
        crate::api::leave::get_leave,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::get_balance,
        crate::api::employee::employee_leaves,
    ),
    components(
        schemas(
            ApplyLeave,
            DecideLeave,
            LeaveRequest,
            LeaveStatus,
            CreateEmployee,
            EmployeeQuery,
            Employee,
            EmployeeListResponse,
            BalanceSummary,
            Role
        )
    ),
    tags(
        (name = "Leave", description = "Leave application and decision APIs"),
        (name = "Employee", description = "Employee management APIs"),
    )
)]
pub struct ApiDoc;
