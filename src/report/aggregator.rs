//! Per-employee attendance aggregation over an inclusive date window.
//!
//! Everything here is pure and infallible: records whose stored date does not
//! parse simply never fall inside a window, an inverted window has zero days,
//! and an employee with no records gets all-zero counts.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{
    attendance::{AttendanceRecord, AttendanceStatus},
    employee::Employee,
    leave_request::AnnualLeaveRequest,
};
use crate::models::DateRange;

/// Tally of recorded statuses. Unmarked days count toward nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CategoryCounts {
    pub present: u32,
    pub deduction: u32,
    pub casual: u32,
    pub sick: u32,
    pub mission: u32,
    pub late: u32,
    pub vacation: u32,
}

impl CategoryCounts {
    fn record(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Deduction => self.deduction += 1,
            AttendanceStatus::Casual => self.casual += 1,
            AttendanceStatus::Sick => self.sick += 1,
            AttendanceStatus::Mission => self.mission += 1,
            AttendanceStatus::Late => self.late += 1,
            AttendanceStatus::Vacation => self.vacation += 1,
        }
    }

    /// Days taken by absence categories: deduction, casual, sick, mission.
    pub fn consumed_days(&self) -> u32 {
        self.deduction
            .saturating_add(self.casual)
            .saturating_add(self.sick)
            .saturating_add(self.mission)
    }
}

/// Everything the report views need for one employee and one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct AttendanceSummary {
    pub total_days: u32,
    pub counts: CategoryCounts,
    pub annual_leave_days: u32,
    pub present_days: u32,
}

/// The employee's records inside `range`, paired with their parsed day.
pub fn records_in_range<'a>(
    employee: &'a Employee,
    records: &'a [AttendanceRecord],
    range: DateRange,
) -> impl Iterator<Item = (NaiveDate, &'a AttendanceRecord)> + 'a {
    records
        .iter()
        .filter(move |r| r.employee_id == employee.id)
        .filter_map(|r| r.day().map(|day| (day, r)))
        .filter(move |(day, _)| range.contains(*day))
}

pub fn compute_category_counts(
    employee: &Employee,
    records: &[AttendanceRecord],
    range: DateRange,
) -> CategoryCounts {
    records_in_range(employee, records, range).fold(
        CategoryCounts::default(),
        |mut counts, (_, record)| {
            counts.record(record.status);
            counts
        },
    )
}

/// Days of the employee's annual leave falling inside `range`.
///
/// Each request is clipped to the window and counted inclusively. Requests
/// are summed independently, so overlapping requests count shared days twice.
/// The sum saturates at `u32::MAX`.
pub fn compute_annual_leave_overlap(
    employee: &Employee,
    leaves: &[AnnualLeaveRequest],
    range: DateRange,
) -> u32 {
    leaves
        .iter()
        .filter(|leave| leave.employee_id == employee.id)
        .filter_map(|leave| clipped_leave_days(leave, range))
        .fold(0u32, u32::saturating_add)
}

/// Inclusive day count of `leave` clipped to `range`, `None` when they do not
/// intersect or the leave dates are unreadable.
pub fn clipped_leave_days(leave: &AnnualLeaveRequest, range: DateRange) -> Option<u32> {
    let (start, end) = leave.span()?;
    let effective_start = start.max(range.from);
    let effective_end = end.min(range.to);
    if effective_end < effective_start {
        return None;
    }
    Some((effective_end - effective_start).num_days() as u32 + 1)
}

/// Present days inferred as every day of the window not consumed by an
/// absence category or annual leave. Late and Vacation records do not reduce
/// it. Never negative.
pub fn compute_present_days(
    total_days: u32,
    counts: &CategoryCounts,
    annual_leave_days: u32,
) -> u32 {
    total_days.saturating_sub(counts.consumed_days().saturating_add(annual_leave_days))
}

pub fn summarize(
    employee: &Employee,
    records: &[AttendanceRecord],
    leaves: &[AnnualLeaveRequest],
    range: DateRange,
) -> AttendanceSummary {
    let total_days = range.total_days();
    if total_days == 0 {
        return AttendanceSummary {
            total_days,
            counts: CategoryCounts::default(),
            annual_leave_days: 0,
            present_days: 0,
        };
    }

    let counts = compute_category_counts(employee, records, range);
    let annual_leave_days = compute_annual_leave_overlap(employee, leaves, range);
    AttendanceSummary {
        total_days,
        counts,
        annual_leave_days,
        present_days: compute_present_days(total_days, &counts, annual_leave_days),
    }
}
