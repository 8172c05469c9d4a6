use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::{
    api::{SharedState, lock},
    error::AppError,
    model::leave_request::AnnualLeaveRequest,
    state::NewAnnualLeave,
};

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "1001")]
    pub employee_id: String,
    #[schema(example = "2024-03-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-03-14", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    /// Free-text duration as written on the request form; day count when omitted
    #[schema(example = "14")]
    pub duration: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaveFilter {
    /// Filter by employee id
    pub employee_id: Option<String>,
}

/* =========================
Create annual leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body(
        content = CreateLeave,
        description = "Annual leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request stored", body = AnnualLeaveRequest),
        (status = 400, description = "start_date after end_date", body = Object, example = json!({
            "message": "start_date cannot be after end_date"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    state: SharedState,
    payload: web::Json<CreateLeave>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let leave = lock(&state)?.add_annual_leave(NewAnnualLeave {
        employee_id: payload.employee_id,
        start_date: payload.start_date,
        end_date: payload.end_date,
        duration: payload.duration,
    })?;

    info!(
        employee_id = %leave.employee_id,
        start = %leave.start_date,
        end = %leave.end_date,
        "Annual leave recorded"
    );
    Ok(HttpResponse::Created().json(leave))
}

#[utoipa::path(
    get,
    path = "/api/v1/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Annual leave requests in submission order", body = [AnnualLeaveRequest])
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    state: SharedState,
    query: web::Query<LeaveFilter>,
) -> actix_web::Result<impl Responder> {
    let state = lock(&state)?;
    let leaves: Vec<&AnnualLeaveRequest> = state
        .annual_leaves()
        .iter()
        .filter(|l| query.employee_id.as_deref().is_none_or(|id| l.employee_id == id))
        .collect();
    Ok(HttpResponse::Ok().json(leaves))
}

#[utoipa::path(
    get,
    path = "/api/v1/leave/{leave_id}",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = AnnualLeaveRequest),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    state: SharedState,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let state = lock(&state)?;
    let leave = state
        .annual_leaves()
        .iter()
        .find(|l| l.id == *path)
        .ok_or_else(|| AppError::NotFound("Leave request not found".to_string()))?;
    Ok(HttpResponse::Ok().json(leave))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::shared;
    use crate::state::tests::state_with;
    use actix_web::{http::StatusCode, test};
    use serde_json::json;

    #[actix_web::test]
    async fn create_list_and_fetch() {
        let state = shared(state_with(&["A", "B"]));
        let app = crate::test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/leave")
            .set_json(json!({"employee_id": "A", "start_date": "2024-03-01", "end_date": "2024-03-14"}))
            .to_request();
        let leave: AnnualLeaveRequest = test::call_and_read_body_json(&app, req).await;
        assert_eq!(leave.duration, "14");

        let req = test::TestRequest::get()
            .uri("/api/v1/leave?employee_id=B")
            .to_request();
        let leaves: Vec<AnnualLeaveRequest> = test::call_and_read_body_json(&app, req).await;
        assert!(leaves.is_empty());

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/leave/{}", leave.id))
            .to_request();
        let fetched: AnnualLeaveRequest = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.id, leave.id);
    }

    #[actix_web::test]
    async fn inverted_dates_are_rejected() {
        let state = shared(state_with(&["A"]));
        let app = crate::test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/leave")
            .set_json(json!({"employee_id": "A", "start_date": "2024-03-14", "end_date": "2024-03-01"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
