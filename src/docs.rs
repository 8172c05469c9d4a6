use crate::api::archive::CreateDocument;
use crate::api::attendance::{CreateAttachment, SetStatus};
use crate::api::employee::{CreateEmployee, EmployeeListResponse, UpdateEmployee};
use crate::api::leave_request::CreateLeave;
use crate::api::report::{InsightsResponse, MonthlyReportRequest};
use crate::api::tools::{
    CashRequest, CashResponse, ClosingRequest, CurrencyTotal, OvertimeRequest, OvertimeResponse,
    TafqitRequest, TafqitResponse,
};
use crate::model::attendance::{Attachment, AttendanceRecord, AttendanceStatus};
use crate::model::document::{DocumentKind, SavedDocument};
use crate::model::employee::Employee;
use crate::model::leave_request::AnnualLeaveRequest;
use crate::models::{Backup, DateRange, RestoreBackup};
use crate::report::aggregator::{AttendanceSummary, CategoryCounts};
use crate::report::dashboard::DailySummary;
use crate::report::grid::{AttendanceGrid, GridCell, GridRow};
use crate::report::insights::{InsightsSummary, Lang};
use crate::report::monthly::{LeavePeriod, MonthlyReport, MonthlyReportRow, MonthlyStats};
use crate::report::stats::{EmployeeStats, StatusDetail};
use crate::utils::cash::{ClosingTotals, Currency};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Admin API",
        version = "1.0.0",
        description = r#"
## Employee Attendance Administration

Back office API for a small organisation's attendance sheet and the Arabic
paperwork built on top of it.

### Key Features
- **Employees**
  - Create, update, list, search and remove employees (removal deletes their records and leave)
- **Attendance**
  - Mark one status per employee and day on a grid, attach supporting files
- **Annual Leave**
  - Record annual leave periods counted into every report
- **Reports**
  - Per-employee statistics, monthly report with exception notes, daily dashboard, insight summary
- **Archive & Backup**
  - Keep snapshots of printed forms, export and restore the whole data set
- **Tools**
  - Amounts in Arabic words (tafqit), overtime pay, cash count and daily closing totals

### Response Format
- JSON bodies, dates as `YYYY-MM-DD`
- Errors as `{"message": "..."}`

---
Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::list_departments,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_records,
        crate::api::attendance::set_status,
        crate::api::attendance::clear_records,
        crate::api::attendance::add_attachment,
        crate::api::attendance::delete_attachment,
        crate::api::attendance::attendance_grid,

        crate::api::leave_request::create_leave,
        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,

        crate::api::report::get_employee_stats,
        crate::api::report::monthly_report,
        crate::api::report::monthly_report_with_overrides,
        crate::api::report::dashboard,
        crate::api::report::insights,

        crate::api::archive::save_document,
        crate::api::archive::list_documents,
        crate::api::archive::get_document,
        crate::api::archive::delete_document,

        crate::api::backup::export_backup,
        crate::api::backup::restore_backup,

        crate::api::tools::tafqit,
        crate::api::tools::overtime,
        crate::api::tools::cash,
        crate::api::tools::closing
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            UpdateEmployee,
            EmployeeListResponse,
            AttendanceStatus,
            Attachment,
            AttendanceRecord,
            SetStatus,
            CreateAttachment,
            AnnualLeaveRequest,
            CreateLeave,
            DateRange,
            CategoryCounts,
            AttendanceSummary,
            StatusDetail,
            EmployeeStats,
            GridCell,
            GridRow,
            AttendanceGrid,
            MonthlyStats,
            LeavePeriod,
            MonthlyReportRow,
            MonthlyReport,
            MonthlyReportRequest,
            DailySummary,
            Lang,
            InsightsSummary,
            InsightsResponse,
            DocumentKind,
            SavedDocument,
            CreateDocument,
            Backup,
            RestoreBackup,
            TafqitRequest,
            TafqitResponse,
            OvertimeRequest,
            OvertimeResponse,
            Currency,
            CurrencyTotal,
            CashRequest,
            CashResponse,
            ClosingRequest,
            ClosingTotals
        )
    ),
    tags(
        (name = "Employee", description = "Employee roster APIs"),
        (name = "Attendance", description = "Attendance marking and attachment APIs"),
        (name = "Leave", description = "Annual leave APIs"),
        (name = "Report", description = "Statistics and report APIs"),
        (name = "Archive", description = "Saved document APIs"),
        (name = "Backup", description = "Data export and restore APIs"),
        (name = "Tools", description = "Document calculator APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route_family() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/v1/employees",
            "/api/v1/attendance/status",
            "/api/v1/leave",
            "/api/v1/reports/monthly",
            "/api/v1/archive/{id}",
            "/api/v1/backup",
            "/api/v1/tools/tafqit",
            "/api/v1/tools/cash",
            "/api/v1/tools/closing",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }
}
