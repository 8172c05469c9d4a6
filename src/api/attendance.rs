use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

use crate::{
    api::{SharedState, lock},
    model::attendance::{AttendanceRecord, AttendanceStatus},
    models::DateRange,
    report::grid::{GridFilter, build_grid},
    state::NewAttachment,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecordQuery {
    pub employee_id: Option<String>,
    /// Inclusive lower bound
    #[param(value_type = Option<String>, example = "2024-02-01")]
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound
    #[param(value_type = Option<String>, example = "2024-02-29")]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetStatus {
    #[schema(example = "1001")]
    pub employee_id: String,
    #[schema(example = "2024-02-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Sick")]
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAttachment {
    #[schema(example = "1001")]
    pub employee_id: String,
    #[schema(example = "2024-02-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "medical-certificate.pdf")]
    pub name: String,
    /// MIME type
    #[serde(rename = "type")]
    #[schema(example = "application/pdf")]
    pub mime_type: String,
    /// Data URL or bare base64
    #[schema(example = "data:application/pdf;base64,JVBERi0xLjQ=")]
    pub data: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttachmentQuery {
    pub employee_id: String,
    #[param(value_type = String, example = "2024-02-01")]
    pub date: NaiveDate,
}

/* =========================
List records
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(RecordQuery),
    responses(
        (status = 200, description = "Attendance records, oldest first", body = [AttendanceRecord])
    ),
    tag = "Attendance"
)]
pub async fn list_records(
    state: SharedState,
    query: web::Query<RecordQuery>,
) -> actix_web::Result<impl Responder> {
    let state = lock(&state)?;
    let mut records: Vec<(NaiveDate, &AttendanceRecord)> = state
        .records()
        .iter()
        .filter(|r| query.employee_id.as_deref().is_none_or(|id| r.employee_id == id))
        .filter_map(|r| r.day().map(|day| (day, r)))
        .filter(|(day, _)| query.from.is_none_or(|from| *day >= from))
        .filter(|(day, _)| query.to.is_none_or(|to| *day <= to))
        .collect();
    records.sort_by_key(|(day, _)| *day);

    let records: Vec<&AttendanceRecord> = records.into_iter().map(|(_, r)| r).collect();
    Ok(HttpResponse::Ok().json(records))
}

/* =========================
Mark a grid cell
========================= */
/// Upserts the single record of `(employee_id, date)`.
///
/// Existing attachments and notes survive a status change. Present stamps a
/// 09:00 check-in, any other status clears it.
#[utoipa::path(
    put,
    path = "/api/v1/attendance/status",
    request_body = SetStatus,
    responses(
        (status = 200, description = "Record after the upsert", body = AttendanceRecord),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn set_status(
    state: SharedState,
    payload: web::Json<SetStatus>,
) -> actix_web::Result<impl Responder> {
    let record = lock(&state)?.set_status(&payload.employee_id, payload.date, payload.status)?;

    debug!(
        employee_id = %payload.employee_id,
        date = %record.date,
        status = %record.status,
        "Attendance marked"
    );
    Ok(HttpResponse::Ok().json(record))
}

#[utoipa::path(
    delete,
    path = "/api/v1/attendance",
    responses(
        (status = 200, description = "All records removed; employees and leave are kept", body = Object, example = json!({
            "message": "Attendance records cleared",
            "deleted": 42
        }))
    ),
    tag = "Attendance"
)]
pub async fn clear_records(state: SharedState) -> actix_web::Result<impl Responder> {
    let deleted = lock(&state)?.clear_records();

    info!(deleted, "Attendance records cleared");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance records cleared",
        "deleted": deleted
    })))
}

/* =========================
Attachments
========================= */
/// Adds a file to the day's record. An unmarked day becomes Present.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/attachments",
    request_body = CreateAttachment,
    responses(
        (status = 201, description = "Record with the new attachment", body = AttendanceRecord),
        (status = 400, description = "Attachment too large"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Attendance"
)]
pub async fn add_attachment(
    state: SharedState,
    payload: web::Json<CreateAttachment>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let record = lock(&state)?.add_attachment(
        &payload.employee_id,
        payload.date,
        NewAttachment {
            name: payload.name,
            mime_type: payload.mime_type,
            data: payload.data,
        },
    )?;

    info!(
        employee_id = %payload.employee_id,
        date = %record.date,
        attachments = record.attachments.len(),
        "Attachment added"
    );
    Ok(HttpResponse::Created().json(record))
}

#[utoipa::path(
    delete,
    path = "/api/v1/attendance/attachments/{attachment_id}",
    params(
        ("attachment_id" = String, Path, description = "Attachment id"),
        AttachmentQuery
    ),
    responses(
        (status = 200, description = "Record without the attachment", body = AttendanceRecord),
        (status = 404, description = "Record or attachment not found")
    ),
    tag = "Attendance"
)]
pub async fn delete_attachment(
    state: SharedState,
    path: web::Path<String>,
    query: web::Query<AttachmentQuery>,
) -> actix_web::Result<impl Responder> {
    let record = lock(&state)?.delete_attachment(&query.employee_id, query.date, &path)?;
    Ok(HttpResponse::Ok().json(record))
}

/* =========================
Marking grid
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/attendance/grid",
    params(DateRange, GridFilter),
    responses(
        (status = 200, description = "Filtered employees by days of the range, at most 60 columns", body = AttendanceGrid)
    ),
    tag = "Attendance"
)]
pub async fn attendance_grid(
    state: SharedState,
    range: web::Query<DateRange>,
    filter: web::Query<GridFilter>,
) -> actix_web::Result<impl Responder> {
    let state = lock(&state)?;
    let grid = build_grid(state.employees(), state.records(), *range, &filter);
    Ok(HttpResponse::Ok().json(grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::shared;
    use crate::state::tests::state_with;
    use actix_web::{http::StatusCode, test};

    #[actix_web::test]
    async fn marking_the_same_cell_twice_keeps_one_record() {
        let state = shared(state_with(&["A"]));
        let app = crate::test_app!(state);

        for status in ["Sick", "Casual"] {
            let req = test::TestRequest::put()
                .uri("/api/v1/attendance/status")
                .set_json(json!({"employee_id": "A", "date": "2024-02-01", "status": status}))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get()
            .uri("/api/v1/attendance?employee_id=A")
            .to_request();
        let body: Vec<AttendanceRecord> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].status, AttendanceStatus::Casual);
    }

    #[actix_web::test]
    async fn unknown_status_is_rejected() {
        let state = shared(state_with(&["A"]));
        let app = crate::test_app!(state);

        let req = test::TestRequest::put()
            .uri("/api/v1/attendance/status")
            .set_json(json!({"employee_id": "A", "date": "2024-02-01", "status": "Holiday"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn attachment_round_trip() {
        let state = shared(state_with(&["A"]));
        let app = crate::test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/attendance/attachments")
            .set_json(json!({
                "employee_id": "A",
                "date": "2024-02-01",
                "name": "note.pdf",
                "type": "application/pdf",
                "data": "data:application/pdf;base64,JVBERi0="
            }))
            .to_request();
        let record: AttendanceRecord = test::call_and_read_body_json(&app, req).await;
        assert_eq!(record.status, AttendanceStatus::Present);
        let attachment_id = &record.attachments[0].id;

        let req = test::TestRequest::delete()
            .uri(&format!(
                "/api/v1/attendance/attachments/{}?employee_id=A&date=2024-02-01",
                attachment_id
            ))
            .to_request();
        let record: AttendanceRecord = test::call_and_read_body_json(&app, req).await;
        assert!(record.attachments.is_empty());
    }

    #[actix_web::test]
    async fn grid_filters_and_sizes_columns() {
        let state = shared(state_with(&["A", "B"]));
        let app = crate::test_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/v1/attendance/grid?from=2024-02-01&to=2024-02-07&search=B")
            .to_request();
        let grid: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(grid["dates"].as_array().unwrap().len(), 7);
        assert_eq!(grid["rows"].as_array().unwrap().len(), 1);
        assert_eq!(grid["rows"][0]["employee"]["id"], "B");
    }

    #[actix_web::test]
    async fn clear_removes_records_only() {
        let state = shared(state_with(&["A"]));
        let app = crate::test_app!(state);

        let req = test::TestRequest::put()
            .uri("/api/v1/attendance/status")
            .set_json(json!({"employee_id": "A", "date": "2024-02-01", "status": "Late"}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::delete().uri("/api/v1/attendance").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["deleted"], 1);
        assert_eq!(lock(&state).unwrap().employees().len(), 1);
    }
}
