use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{
    attendance::{AttendanceRecord, AttendanceStatus},
    employee::Employee,
    leave_request::AnnualLeaveRequest,
};
use crate::models::DateRange;
use crate::report::aggregator::{AttendanceSummary, records_in_range, summarize};
use crate::utils::date_utils::format_day;

/// One absence day listed under the employee statistics panel.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatusDetail {
    #[schema(example = "2024-02-01")]
    pub date: String,
    #[serde(rename = "type")]
    #[schema(example = "إجازة مرضية")]
    pub kind: String,
    #[schema(example = "مرفق شهادة طبية")]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeStats {
    pub employee: Employee,
    pub range: DateRange,
    pub summary: AttendanceSummary,
    pub details: Vec<StatusDetail>,
}

/// Fixed remark shown next to each absence type on the panel.
fn detail_remark(status: AttendanceStatus) -> Option<&'static str> {
    match status {
        AttendanceStatus::Deduction => Some("لم يتم تقديم سبب"),
        AttendanceStatus::Casual => Some("تمت الموافقة"),
        AttendanceStatus::Sick => Some("مرفق شهادة طبية"),
        AttendanceStatus::Mission => Some("مهمة رسمية"),
        _ => None,
    }
}

pub fn employee_stats(
    employee: &Employee,
    records: &[AttendanceRecord],
    leaves: &[AnnualLeaveRequest],
    range: DateRange,
) -> EmployeeStats {
    let mut details: Vec<_> = records_in_range(employee, records, range)
        .filter_map(|(day, record)| {
            detail_remark(record.status).map(|remark| {
                (
                    day,
                    StatusDetail {
                        date: format_day(day),
                        kind: record.status.label_ar().to_string(),
                        status: remark.to_string(),
                    },
                )
            })
        })
        .collect();
    details.sort_by_key(|(day, _)| *day);

    EmployeeStats {
        employee: employee.clone(),
        range,
        summary: summarize(employee, records, leaves, range),
        details: details.into_iter().map(|(_, detail)| detail).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::aggregator::tests::{employee, range, record};

    #[test]
    fn details_list_absences_with_their_remarks() {
        let emp = employee("E");
        let records = vec![
            record("E", "2024-02-04", AttendanceStatus::Mission),
            record("E", "2024-02-01", AttendanceStatus::Deduction),
            record("E", "2024-02-02", AttendanceStatus::Late),
            record("E", "2024-02-03", AttendanceStatus::Present),
        ];

        let stats = employee_stats(&emp, &records, &[], range("2024-02-01", "2024-02-07"));

        assert_eq!(stats.summary.counts.present, 1);
        assert_eq!(stats.summary.counts.late, 1);
        assert_eq!(stats.details.len(), 2);
        assert_eq!(stats.details[0].date, "2024-02-01");
        assert_eq!(stats.details[0].kind, "إجازة بالخصم");
        assert_eq!(stats.details[0].status, "لم يتم تقديم سبب");
        assert_eq!(stats.details[1].status, "مهمة رسمية");
    }
}
