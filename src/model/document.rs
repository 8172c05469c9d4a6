use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;
use utoipa::ToSchema;

/// Printable business documents that can be archived.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display,
)]
pub enum DocumentKind {
    CasualLeave,
    AnnualLeave,
    WorkResumption,
    PaymentVoucher,
    Overtime,
    BillsDue,
    MonthlyReport,
    CustodyForm,
    CashForm,
    DailyClosingForm,
    MoneyReceiptForm,
    BankDepositG4,
    NotesForm,
}

/// Snapshot of a filled-in form. The payload is opaque to this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedDocument {
    pub id: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentKind,
    #[schema(example = "Monthly Report (2024-02-01 - 2024-02-29)")]
    pub title: String,
    pub date: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = Object)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
}

impl SavedDocument {
    /// Archive search: title or employee name, case-insensitive.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self
                .employee_name
                .as_ref()
                .is_some_and(|name| name.to_lowercase().contains(&term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(title: &str, employee_name: Option<&str>) -> SavedDocument {
        SavedDocument {
            id: "doc-1".to_string(),
            doc_type: DocumentKind::CasualLeave,
            title: title.to_string(),
            date: "2024-02-01".to_string(),
            created_at: Utc::now(),
            data: json!({}),
            employee_name: employee_name.map(str::to_string),
        }
    }

    #[test]
    fn search_covers_title_and_employee_name() {
        assert!(doc("Casual Leave Request", None).matches_search("leave"));
        assert!(doc("Request", Some("Sarah Ahmed")).matches_search("SARAH"));
        assert!(!doc("Request", None).matches_search("sarah"));
    }

    #[test]
    fn kind_is_serialized_under_type() {
        let value = serde_json::to_value(doc("Voucher", None)).unwrap();
        assert_eq!(value["type"], "CasualLeave");
        assert!(value.get("employeeName").is_none());
    }
}
