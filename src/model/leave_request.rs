use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::date_utils::parse_day;

/// Submitted annual leave span, independent of the day-by-day records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnualLeaveRequest {
    pub id: String,
    pub employee_id: String,
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub start_date: String,
    /// Inclusive.
    #[schema(example = "2024-01-10", value_type = String, format = "date")]
    pub end_date: String,
    #[schema(example = "10 أيام")]
    #[serde(default)]
    pub duration: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

impl AnnualLeaveRequest {
    /// Both ends parsed, `None` when either is corrupt.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((parse_day(&self.start_date)?, parse_day(&self.end_date)?))
    }
}
