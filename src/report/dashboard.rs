use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;
use crate::utils::date_utils::format_day;

/// Headline numbers for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DailySummary {
    #[schema(example = "2024-02-01")]
    pub date: String,
    pub total_employees: u32,
    pub present: u32,
    /// Deduction, Casual, Sick and Vacation. Mission counts as working.
    pub absent: u32,
    pub late: u32,
    /// Employees with no record for the day.
    pub pending: u32,
    /// Present as a whole percentage of the roster.
    pub attendance_rate: u32,
}

pub fn daily_summary(
    employees: &[Employee],
    records: &[AttendanceRecord],
    day: NaiveDate,
) -> DailySummary {
    let todays: Vec<_> = records.iter().filter(|r| r.day() == Some(day)).collect();
    let count = |pred: fn(AttendanceStatus) -> bool| {
        todays.iter().filter(|r| pred(r.status)).count() as u32
    };

    let present = count(|s| s == AttendanceStatus::Present);
    let absent = count(|s| {
        matches!(
            s,
            AttendanceStatus::Deduction
                | AttendanceStatus::Casual
                | AttendanceStatus::Sick
                | AttendanceStatus::Vacation
        )
    });
    let late = count(|s| s == AttendanceStatus::Late);
    let total_employees = employees.len() as u32;

    DailySummary {
        date: format_day(day),
        total_employees,
        present,
        absent,
        late,
        pending: total_employees.saturating_sub(todays.len() as u32),
        attendance_rate: (present as f64 / total_employees.max(1) as f64 * 100.0).round() as u32,
    }
}
