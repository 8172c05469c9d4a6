use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::{
    attendance::AttendanceRecord, employee::Employee, leave_request::AnnualLeaveRequest,
};

/// Inclusive calendar window. An inverted window is empty, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRange {
    #[schema(example = "2024-02-01", value_type = String, format = "date")]
    #[param(value_type = String, example = "2024-02-01")]
    pub from: NaiveDate,
    #[schema(example = "2024-02-29", value_type = String, format = "date")]
    #[param(value_type = String, example = "2024-02-01")]
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn is_empty(&self) -> bool {
        self.to < self.from
    }

    /// Inclusive day count, 0 for an inverted window.
    pub fn total_days(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            (self.to - self.from).num_days() as u32 + 1
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }

    /// Days of the window in ascending order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let to = self.to;
        self.from.iter_days().take_while(move |d| *d <= to)
    }
}

/// Full data set as exported by the backup download and accepted on restore.
/// Restore requires employees and records; leaves are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub employees: Vec<Employee>,
    pub records: Vec<AttendanceRecord>,
    #[serde(default)]
    pub annual_leaves: Vec<AnnualLeaveRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestoreBackup {
    pub employees: Option<Vec<Employee>>,
    pub records: Option<Vec<AttendanceRecord>>,
    pub annual_leaves: Option<Vec<AnnualLeaveRequest>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn single_day_window_has_one_day() {
        assert_eq!(DateRange::new(day("2024-02-01"), day("2024-02-01")).total_days(), 1);
    }

    #[test]
    fn inverted_window_is_empty() {
        let range = DateRange::new(day("2024-02-05"), day("2024-02-01"));
        assert!(range.is_empty());
        assert_eq!(range.total_days(), 0);
        assert_eq!(range.days().count(), 0);
    }

    #[test]
    fn window_spanning_leap_day() {
        let range = DateRange::new(day("2024-02-01"), day("2024-03-01"));
        assert_eq!(range.total_days(), 30);
        assert_eq!(range.days().last(), Some(day("2024-03-01")));
        assert!(range.contains(day("2024-02-29")));
        assert!(!range.contains(day("2024-03-02")));
    }
}
