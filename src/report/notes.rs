use crate::model::{attendance::AttendanceRecord, employee::Employee};
use crate::models::DateRange;
use crate::report::aggregator::records_in_range;
use crate::utils::date_utils::{arabic_weekday, format_dmy};

/// Arabic comma used between notes on the printed report.
pub const NOTE_SEPARATOR: &str = "، ";

/// Exception notes for the employee's records in `range`, oldest first.
///
/// One note per Sick, Casual, Deduction, Mission or Late record, shaped
/// `"1 يوم <category> يوم <weekday> <DD/MM/YYYY>"`. Present and Vacation
/// records, unmarked days, and records with unreadable dates produce nothing.
/// Notes are formatted as the iterator is consumed.
pub fn generate_exception_notes<'a>(
    employee: &'a Employee,
    records: &'a [AttendanceRecord],
    range: DateRange,
) -> impl Iterator<Item = String> + 'a {
    let mut noted: Vec<_> = records_in_range(employee, records, range)
        .filter(|(_, record)| record.status.is_noted())
        .collect();
    noted.sort_by_key(|(day, _)| *day);

    noted.into_iter().map(|(day, record)| {
        format!(
            "1 يوم {} يوم {} {}",
            record.status.label_ar(),
            arabic_weekday(day),
            format_dmy(day)
        )
    })
}

/// The report's free-text notes field.
pub fn join_notes(notes: impl Iterator<Item = String>) -> String {
    notes.collect::<Vec<_>>().join(NOTE_SEPARATOR)
}
