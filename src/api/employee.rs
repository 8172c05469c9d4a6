use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::{
    api::{SharedState, lock},
    model::employee::Employee,
    state::{EmployeeChanges, NewEmployee},
};

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    /// Generated when omitted
    #[schema(example = "1001")]
    pub id: Option<String>,
    #[schema(example = "Sarah Ahmed")]
    pub name: String,
    #[schema(example = "Accountant")]
    pub role: String,
    #[schema(example = "Finance")]
    pub department: String,
    /// Defaults to today
    #[schema(example = "2024-01-15", format = "date")]
    pub join_date: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Deserialize, Default, ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    #[schema(example = "2024-01-15", format = "date")]
    pub join_date: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// Exact department name, `ALL` for every department
    pub department: Option<String>,
    /// Name fragment (case-insensitive) or id fragment
    pub search: Option<String>,
    /// 1-based
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 100)]
    pub per_page: u32,
    #[schema(example = 12)]
    pub total: usize,
}

/* =========================
Create employee
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Missing name, role or department", body = Object, example = json!({
            "message": "name, role and department are required"
        })),
        (status = 409, description = "Employee id already taken", body = Object, example = json!({
            "message": "Employee id already exists: 1001"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    state: SharedState,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let employee = lock(&state)?.add_employee(NewEmployee {
        id: payload.id,
        name: payload.name,
        role: payload.role,
        department: payload.department,
        join_date: payload.join_date,
        avatar_url: payload.avatar_url,
    })?;

    info!(employee_id = %employee.id, "Employee created");
    Ok(HttpResponse::Created().json(employee))
}

/* =========================
List employees
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Filtered employee list in roster order", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    state: SharedState,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(100).clamp(1, 500);
    let offset = (page as usize - 1).saturating_mul(per_page as usize);

    let state = lock(&state)?;
    let matching: Vec<&Employee> = state
        .employees()
        .iter()
        .filter(|e| match query.department.as_deref() {
            None | Some("ALL") => true,
            Some(dept) => e.department == dept,
        })
        .filter(|e| query.search.as_deref().is_none_or(|term| e.matches_search(term)))
        .collect();

    let total = matching.len();
    let data = matching
        .into_iter()
        .skip(offset)
        .take(per_page as usize)
        .cloned()
        .collect();

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/departments",
    responses(
        (status = 200, description = "Distinct departments in roster order", body = [String], example = json!(["Sales", "Finance"]))
    ),
    tag = "Employee"
)]
pub async fn list_departments(state: SharedState) -> actix_web::Result<impl Responder> {
    Ok(HttpResponse::Ok().json(lock(&state)?.departments()))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(
        ("id" = String, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    state: SharedState,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let state = lock(&state)?;
    let employee = state.employee(&path)?;
    Ok(HttpResponse::Ok().json(employee))
}

#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(
        ("id" = String, Path, description = "Employee id")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    state: SharedState,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployee>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let employee = lock(&state)?.update_employee(
        &path,
        EmployeeChanges {
            name: payload.name,
            role: payload.role,
            department: payload.department,
            join_date: payload.join_date,
            avatar_url: payload.avatar_url,
        },
    )?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Removes the employee along with their attendance records and annual leave.
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(
        ("id" = String, Path, description = "Employee id")
    ),
    responses(
        (status = 200, description = "Employee and their data deleted", body = Object, example = json!({
            "message": "Employee deleted"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    state: SharedState,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    lock(&state)?.remove_employee(&employee_id)?;

    info!(employee_id, "Employee deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted"
    })))
}
