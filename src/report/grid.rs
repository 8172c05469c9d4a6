use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;
use crate::models::DateRange;
use crate::utils::date_utils::format_day;

/// The marking grid shows at most this many day columns.
pub const MAX_GRID_DAYS: usize = 60;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GridFilter {
    /// Name or id fragment
    pub search: Option<String>,
    /// Exact department name, omitted or `ALL` for everyone
    pub department: Option<String>,
}

impl GridFilter {
    pub fn admits(&self, employee: &Employee) -> bool {
        let search_ok = self
            .search
            .as_deref()
            .is_none_or(|term| employee.matches_search(term));
        let department_ok = match self.department.as_deref() {
            None | Some("ALL") => true,
            Some(dept) => employee.department == dept,
        };
        search_ok && department_ok
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GridCell {
    pub status: Option<AttendanceStatus>,
    pub check_in_time: Option<String>,
    pub attachment_count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GridRow {
    pub employee: Employee,
    /// One cell per entry of `AttendanceGrid::dates`.
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceGrid {
    pub dates: Vec<String>,
    pub rows: Vec<GridRow>,
}

pub fn build_grid(
    employees: &[Employee],
    records: &[AttendanceRecord],
    range: DateRange,
    filter: &GridFilter,
) -> AttendanceGrid {
    let days: Vec<_> = range.days().take(MAX_GRID_DAYS).collect();

    let rows = employees
        .iter()
        .filter(|emp| filter.admits(emp))
        .map(|emp| GridRow {
            employee: emp.clone(),
            cells: days
                .iter()
                .map(|day| {
                    let record = records.iter().find(|r| r.is_for(&emp.id, *day));
                    GridCell {
                        status: record.map(|r| r.status),
                        check_in_time: record.and_then(|r| r.check_in_time.clone()),
                        attachment_count: record.map_or(0, |r| r.attachments.len()),
                    }
                })
                .collect(),
        })
        .collect();

    AttendanceGrid {
        dates: days.into_iter().map(format_day).collect(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::aggregator::tests::{employee, range, record};

    #[test]
    fn grid_is_capped_at_sixty_days() {
        let grid = build_grid(
            &[employee("A")],
            &[],
            range("2024-01-01", "2024-12-31"),
            &GridFilter::default(),
        );
        assert_eq!(grid.dates.len(), MAX_GRID_DAYS);
        assert_eq!(grid.rows[0].cells.len(), MAX_GRID_DAYS);
    }

    #[test]
    fn cells_reflect_records_and_filters_apply() {
        let mut b = employee("B");
        b.department = "Finance".to_string();
        let employees = vec![employee("A"), b];
        let records = vec![record("A", "2024-02-02", AttendanceStatus::Sick)];

        let filter = GridFilter {
            search: None,
            department: Some("Sales".to_string()),
        };
        let grid = build_grid(&employees, &records, range("2024-02-01", "2024-02-03"), &filter);

        assert_eq!(grid.dates, vec!["2024-02-01", "2024-02-02", "2024-02-03"]);
        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.rows[0].cells[0].status, None);
        assert_eq!(grid.rows[0].cells[1].status, Some(AttendanceStatus::Sick));
    }
}
