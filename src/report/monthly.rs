use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{
    attendance::AttendanceRecord, employee::Employee, leave_request::AnnualLeaveRequest,
};
use crate::models::DateRange;
use crate::report::aggregator::{clipped_leave_days, summarize};
use crate::report::notes::{generate_exception_notes, join_notes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthlyStats {
    pub present: u32,
    pub sick: u32,
    pub casual: u32,
    pub mission: u32,
    pub deduction: u32,
    pub annual: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LeavePeriod {
    #[schema(example = "2024-02-10")]
    pub start: String,
    #[schema(example = "2024-02-14")]
    pub end: String,
}

/// One employee line of the monthly attendance report.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyReportRow {
    pub employee: Employee,
    /// Computed counts; `stats.present` is never overridden.
    pub stats: MonthlyStats,
    /// Present days as printed: the preparer's override when given.
    pub present_display: u32,
    pub present_overridden: bool,
    /// First annual leave request touching the window.
    pub annual_leave: Option<LeavePeriod>,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyReport {
    pub range: DateRange,
    pub total_days: u32,
    pub rows: Vec<MonthlyReportRow>,
}

/// Builds the report for every employee in roster order.
///
/// `present_overrides` maps employee id to a manually entered present count.
/// Overrides only change what is displayed; records are untouched.
pub fn build_monthly_report(
    employees: &[Employee],
    records: &[AttendanceRecord],
    leaves: &[AnnualLeaveRequest],
    range: DateRange,
    present_overrides: &HashMap<String, u32>,
) -> MonthlyReport {
    let rows = employees
        .iter()
        .map(|emp| {
            let summary = summarize(emp, records, leaves, range);
            let annual_leave = leaves
                .iter()
                .filter(|leave| leave.employee_id == emp.id)
                .find(|leave| clipped_leave_days(leave, range).is_some())
                .map(|leave| LeavePeriod {
                    start: leave.start_date.clone(),
                    end: leave.end_date.clone(),
                });
            let override_value = present_overrides.get(&emp.id).copied();

            MonthlyReportRow {
                employee: emp.clone(),
                stats: MonthlyStats {
                    present: summary.present_days,
                    sick: summary.counts.sick,
                    casual: summary.counts.casual,
                    mission: summary.counts.mission,
                    deduction: summary.counts.deduction,
                    annual: summary.annual_leave_days,
                },
                present_display: override_value.unwrap_or(summary.present_days),
                present_overridden: override_value.is_some(),
                annual_leave,
                notes: join_notes(generate_exception_notes(emp, records, range)),
            }
        })
        .collect();

    MonthlyReport {
        range,
        total_days: range.total_days(),
        rows,
    }
}
