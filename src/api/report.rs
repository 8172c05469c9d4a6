use std::collections::HashMap;

use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::{
    api::{SharedState, lock},
    error::AppError,
    models::DateRange,
    report::{
        dashboard::daily_summary,
        insights::{InsightsSummary, Lang, insights_prompt, insights_summary},
        monthly::build_monthly_report,
        stats::employee_stats,
    },
};

#[derive(Deserialize, ToSchema)]
pub struct MonthlyReportRequest {
    #[schema(example = "2024-02-01", format = "date", value_type = String)]
    pub from: NaiveDate,
    #[schema(example = "2024-02-29", format = "date", value_type = String)]
    pub to: NaiveDate,
    /// Employee id to the present count typed in by the preparer
    #[serde(default)]
    #[schema(example = json!({"1001": 20}))]
    pub present_overrides: HashMap<String, u32>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Defaults to today
    #[param(value_type = Option<String>, example = "2024-02-01")]
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InsightsQuery {
    /// Answer language, `ar` when omitted
    #[param(value_type = Option<String>, example = "ar")]
    pub lang: Option<Lang>,
}

#[derive(Serialize, ToSchema)]
pub struct InsightsResponse {
    pub summary: InsightsSummary,
    /// Ready-to-send analyst prompt for a text model
    pub prompt: String,
}

/* =========================
Employee statistics
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/reports/employees/{id}/stats",
    params(
        ("id" = String, Path, description = "Employee id"),
        DateRange
    ),
    responses(
        (status = 200, description = "Counts, present days and absence details for the range", body = EmployeeStats),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Report"
)]
pub async fn get_employee_stats(
    state: SharedState,
    path: web::Path<String>,
    range: web::Query<DateRange>,
) -> actix_web::Result<impl Responder> {
    let state = lock(&state)?;
    let employee = state.employee(&path)?;
    let stats = employee_stats(employee, state.records(), state.annual_leaves(), *range);
    Ok(HttpResponse::Ok().json(stats))
}

/* =========================
Monthly report
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/reports/monthly",
    params(DateRange),
    responses(
        (status = 200, description = "One row per employee", body = MonthlyReport)
    ),
    tag = "Report"
)]
pub async fn monthly_report(
    state: SharedState,
    range: web::Query<DateRange>,
) -> actix_web::Result<impl Responder> {
    let state = lock(&state)?;
    let report = build_monthly_report(
        state.employees(),
        state.records(),
        state.annual_leaves(),
        *range,
        &HashMap::new(),
    );
    Ok(HttpResponse::Ok().json(report))
}

/// Same report with manually entered present counts. Nothing is stored.
#[utoipa::path(
    post,
    path = "/api/v1/reports/monthly",
    request_body = MonthlyReportRequest,
    responses(
        (status = 200, description = "One row per employee, overrides applied to the displayed present count", body = MonthlyReport)
    ),
    tag = "Report"
)]
pub async fn monthly_report_with_overrides(
    state: SharedState,
    payload: web::Json<MonthlyReportRequest>,
) -> actix_web::Result<impl Responder> {
    let state = lock(&state)?;
    let report = build_monthly_report(
        state.employees(),
        state.records(),
        state.annual_leaves(),
        DateRange::new(payload.from, payload.to),
        &payload.present_overrides,
    );
    Ok(HttpResponse::Ok().json(report))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Daily headline numbers", body = DailySummary)
    ),
    tag = "Report"
)]
pub async fn dashboard(
    state: SharedState,
    query: web::Query<DashboardQuery>,
) -> actix_web::Result<impl Responder> {
    let day = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let state = lock(&state)?;
    Ok(HttpResponse::Ok().json(daily_summary(state.employees(), state.records(), day)))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/insights",
    params(InsightsQuery),
    responses(
        (status = 200, description = "Attendance summary and the analyst prompt built from it", body = InsightsResponse)
    ),
    tag = "Report"
)]
pub async fn insights(
    state: SharedState,
    query: web::Query<InsightsQuery>,
) -> actix_web::Result<impl Responder> {
    let summary = {
        let state = lock(&state)?;
        insights_summary(state.employees(), state.records())
    };
    let prompt = insights_prompt(&summary, query.lang.unwrap_or_default()).map_err(|e| {
        error!(error = %e, "Failed to build insights prompt");
        AppError::Internal
    })?;

    Ok(HttpResponse::Ok().json(InsightsResponse { summary, prompt }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::shared;
    use crate::model::attendance::AttendanceStatus;
    use crate::report::aggregator::tests::day;
    use crate::state::tests::state_with;
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};

    fn seeded() -> SharedState {
        let mut state = state_with(&["A", "B"]);
        for (d, status) in [
            ("2024-02-01", AttendanceStatus::Sick),
            ("2024-02-02", AttendanceStatus::Late),
            ("2024-02-03", AttendanceStatus::Deduction),
        ] {
            state.set_status("A", day(d), status).unwrap();
        }
        shared(state)
    }

    #[actix_web::test]
    async fn stats_for_a_week() {
        let state = seeded();
        let app = crate::test_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/v1/reports/employees/A/stats?from=2024-02-01&to=2024-02-05")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["summary"]["total_days"], 5);
        assert_eq!(body["summary"]["present_days"], 3);
        assert_eq!(body["details"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn stats_for_unknown_employee_is_404() {
        let state = seeded();
        let app = crate::test_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/v1/reports/employees/ghost/stats?from=2024-02-01&to=2024-02-05")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn monthly_override_changes_display_only() {
        let state = seeded();
        let app = crate::test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/reports/monthly")
            .set_json(json!({
                "from": "2024-02-01",
                "to": "2024-02-29",
                "present_overrides": {"A": 20}
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let row = &body["rows"][0];
        assert_eq!(row["employee"]["id"], "A");
        assert_eq!(row["present_display"], 20);
        assert_eq!(row["present_overridden"], true);
        assert_eq!(row["stats"]["present"], 27);
        assert_eq!(body["rows"][1]["present_overridden"], false);
    }

    #[actix_web::test]
    async fn dashboard_for_a_given_day() {
        let state = seeded();
        let app = crate::test_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/v1/reports/dashboard?date=2024-02-01")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total_employees"], 2);
        assert_eq!(body["absent"], 1);
        assert_eq!(body["pending"], 1);
    }

    #[actix_web::test]
    async fn insights_in_english() {
        let state = seeded();
        let app = crate::test_app!(state);

        let req = test::TestRequest::get()
            .uri("/api/v1/reports/insights?lang=en")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["summary"]["lateCount"], 1);
        assert!(body["prompt"].as_str().unwrap().ends_with("English language."));
    }
}
