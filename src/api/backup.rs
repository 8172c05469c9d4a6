use actix_web::{HttpResponse, Responder, http::header, web};
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    api::{SharedState, lock},
    models::RestoreBackup,
};

/// Downloads every employee, attendance record and annual leave request.
#[utoipa::path(
    get,
    path = "/api/v1/backup",
    responses(
        (status = 200, description = "Backup file", body = Backup)
    ),
    tag = "Backup"
)]
pub async fn export_backup(state: SharedState) -> actix_web::Result<impl Responder> {
    let backup = lock(&state)?.export_backup();
    let filename = format!(
        "attendance_backup_{}.json",
        Utc::now().date_naive().format("%Y-%m-%d")
    );

    Ok(HttpResponse::Ok()
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .json(backup))
}

/// Replaces the data set with a backup file. Annual leave is only replaced
/// when the file carries it. Archived documents are not touched.
#[utoipa::path(
    post,
    path = "/api/v1/backup",
    request_body = RestoreBackup,
    responses(
        (status = 200, description = "Data restored", body = Object, example = json!({
            "message": "Data restored",
            "employees": 12,
            "records": 340
        })),
        (status = 400, description = "Backup lacks employees or records, or repeats an employee id", body = Object, example = json!({
            "message": "Invalid backup file: employees and records are required"
        }))
    ),
    tag = "Backup"
)]
pub async fn restore_backup(
    state: SharedState,
    payload: web::Json<RestoreBackup>,
) -> actix_web::Result<impl Responder> {
    let mut state = lock(&state)?;
    state.restore_backup(payload.into_inner()).inspect_err(|e| {
        warn!(error = %e, "Backup rejected");
    })?;

    let (employees, records) = (state.employees().len(), state.records().len());
    info!(employees, records, "Data restored from backup");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Data restored",
        "employees": employees,
        "records": records
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::shared;
    use crate::model::attendance::AttendanceStatus;
    use crate::models::Backup;
    use crate::report::aggregator::tests::day;
    use crate::state::tests::state_with;
    use actix_web::{http::StatusCode, test};

    #[actix_web::test]
    async fn export_then_restore_into_another_instance() {
        let source = shared(state_with(&["A", "B"]));
        lock(&source)
            .unwrap()
            .set_status("A", day("2024-02-01"), AttendanceStatus::Sick)
            .unwrap();
        let app = crate::test_app!(source);

        let req = test::TestRequest::get().uri("/api/v1/backup").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.headers().contains_key(header::CONTENT_DISPOSITION));
        let backup: Backup = test::read_body_json(resp).await;
        assert_eq!(backup.employees.len(), 2);

        let target = shared(state_with(&[]));
        let app = crate::test_app!(target);
        let req = test::TestRequest::post()
            .uri("/api/v1/backup")
            .set_json(&backup)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let target = lock(&target).unwrap();
        assert_eq!(target.employees().len(), 2);
        assert_eq!(target.records().len(), 1);
    }

    #[actix_web::test]
    async fn backup_without_records_is_rejected() {
        let state = shared(state_with(&["A"]));
        let app = crate::test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/backup")
            .set_json(json!({"employees": []}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(lock(&state).unwrap().employees().len(), 1);
    }

    #[actix_web::test]
    async fn backup_with_repeated_employee_id_is_rejected() {
        let state = shared(state_with(&["A", "B"]));
        let app = crate::test_app!(state);
        let twin = lock(&state).unwrap().employees()[0].clone();

        let req = test::TestRequest::post()
            .uri("/api/v1/backup")
            .set_json(json!({"employees": [twin, twin], "records": []}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid backup file: duplicate employee id A");
        assert_eq!(lock(&state).unwrap().employees().len(), 2);
    }
}
