use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

use crate::utils::date_utils::parse_day;

/// Check-in time stamped on a record when it is marked present.
pub const DEFAULT_CHECK_IN: &str = "09:00";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    EnumIter,
)]
pub enum AttendanceStatus {
    Present,
    /// Leave with salary deduction.
    Deduction,
    Casual,
    Sick,
    /// Official work assignment outside the office.
    Mission,
    Late,
    Vacation,
}

impl AttendanceStatus {
    /// Arabic label used on printed reports.
    pub fn label_ar(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "حضور",
            AttendanceStatus::Deduction => "إجازة بالخصم",
            AttendanceStatus::Casual => "إجازة عرضية",
            AttendanceStatus::Sick => "إجازة مرضية",
            AttendanceStatus::Mission => "مباشرة عمل",
            AttendanceStatus::Late => "تأخير",
            AttendanceStatus::Vacation => "إجازة سنوية",
        }
    }

    /// Statuses that consume a day when inferring present days.
    /// Late and Vacation do not.
    pub fn consumes_day(&self) -> bool {
        matches!(
            self,
            AttendanceStatus::Deduction
                | AttendanceStatus::Casual
                | AttendanceStatus::Sick
                | AttendanceStatus::Mission
        )
    }

    /// Statuses that produce an exception note on the monthly report.
    pub fn is_noted(&self) -> bool {
        self.consumes_day() || *self == AttendanceStatus::Late
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub name: String,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Payload as a data URL or bare base64 text.
    pub data: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

impl Attachment {
    /// Approximate decoded size of the payload in bytes.
    pub fn payload_bytes(&self) -> usize {
        let encoded = match self.data.split_once(";base64,") {
            Some((_, body)) => body,
            None => self.data.as_str(),
        };
        let padding = encoded.bytes().rev().take_while(|b| *b == b'=').count();
        (encoded.len() / 4 * 3).saturating_sub(padding)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub employee_id: String,
    /// Calendar day as persisted, normally `YYYY-MM-DD`.
    #[schema(example = "2024-02-01")]
    pub date: String,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl AttendanceRecord {
    /// Parsed calendar day, `None` for a corrupt stored value.
    pub fn day(&self) -> Option<NaiveDate> {
        parse_day(&self.date)
    }

    pub fn is_for(&self, employee_id: &str, day: NaiveDate) -> bool {
        self.employee_id == employee_id && self.day() == Some(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn only_four_statuses_consume_days() {
        let consuming: Vec<_> = AttendanceStatus::iter().filter(|s| s.consumes_day()).collect();
        assert_eq!(
            consuming,
            vec![
                AttendanceStatus::Deduction,
                AttendanceStatus::Casual,
                AttendanceStatus::Sick,
                AttendanceStatus::Mission
            ]
        );
    }

    #[test]
    fn late_is_noted_but_vacation_and_present_are_not() {
        assert!(AttendanceStatus::Late.is_noted());
        assert!(!AttendanceStatus::Vacation.is_noted());
        assert!(!AttendanceStatus::Present.is_noted());
    }

    #[test]
    fn status_round_trips_through_its_wire_name() {
        assert_eq!(AttendanceStatus::from_str("Mission").unwrap(), AttendanceStatus::Mission);
        assert_eq!(AttendanceStatus::Deduction.to_string(), "Deduction");
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Sick).unwrap(),
            "\"Sick\""
        );
    }

    #[test]
    fn record_with_corrupt_date_has_no_day() {
        let record: AttendanceRecord = serde_json::from_str(
            r#"{"id":"r1","employeeId":"1","date":"not-a-date","status":"Sick"}"#,
        )
        .unwrap();
        assert_eq!(record.day(), None);
        assert!(record.attachments.is_empty());
    }

    #[test]
    fn attachment_payload_size_ignores_data_url_prefix() {
        let attachment = Attachment {
            id: "a".to_string(),
            name: "note.txt".to_string(),
            mime_type: "text/plain".to_string(),
            data: "data:text/plain;base64,aGVsbG8=".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(attachment.payload_bytes(), 5);
    }
}
