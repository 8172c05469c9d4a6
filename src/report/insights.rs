use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;

/// How many of the latest records are handed to the analyst.
pub const RECENT_RECORDS: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Lang {
    En,
    #[default]
    Ar,
}

/// Compact data set behind the AI-written attendance summary.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightsSummary {
    pub total_employees: usize,
    pub total_records: usize,
    /// Deduction records.
    pub absent_count: usize,
    pub late_count: usize,
    pub recent_records: Vec<AttendanceRecord>,
}

pub fn insights_summary(employees: &[Employee], records: &[AttendanceRecord]) -> InsightsSummary {
    let count = |status: AttendanceStatus| records.iter().filter(|r| r.status == status).count();
    InsightsSummary {
        total_employees: employees.len(),
        total_records: records.len(),
        absent_count: count(AttendanceStatus::Deduction),
        late_count: count(AttendanceStatus::Late),
        recent_records: records[records.len().saturating_sub(RECENT_RECORDS)..].to_vec(),
    }
}

/// Analyst prompt for a text model. The model call belongs to the caller.
pub fn insights_prompt(summary: &InsightsSummary, lang: Lang) -> serde_json::Result<String> {
    let language = match lang {
        Lang::Ar => "Provide the response strictly in Arabic language.",
        Lang::En => "Provide the response in English language.",
    };
    let data = serde_json::to_string_pretty(summary)?;

    Ok(format!(
        "You are an HR analyst reviewing employee attendance.\n\
         Attendance summary data:\n{data}\n\n\
         Please provide:\n\
         1. A brief analysis of the attendance trends.\n\
         2. Three actionable recommendations to improve attendance.\n\
         3. Any potential issues suggested by the figures, such as high absenteeism.\n\n\
         Keep the tone professional yet encouraging and format the answer in Markdown.\n\
         {language}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::aggregator::tests::{employee, record};
    use std::str::FromStr;

    #[test]
    fn keeps_only_the_latest_records() {
        let records: Vec<_> = (1..=25)
            .map(|d| record("A", &format!("2024-01-{:02}", d), AttendanceStatus::Late))
            .collect();

        let summary = insights_summary(&[employee("A")], &records);

        assert_eq!(summary.total_records, 25);
        assert_eq!(summary.late_count, 25);
        assert_eq!(summary.absent_count, 0);
        assert_eq!(summary.recent_records.len(), RECENT_RECORDS);
        assert_eq!(summary.recent_records[0].date, "2024-01-06");
    }

    #[test]
    fn prompt_embeds_data_and_language() {
        let summary = insights_summary(&[employee("A")], &[]);
        let prompt = insights_prompt(&summary, Lang::from_str("ar").unwrap()).unwrap();
        assert!(prompt.contains("\"totalEmployees\": 1"));
        assert!(prompt.ends_with("strictly in Arabic language."));
    }
}
