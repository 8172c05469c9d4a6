use chrono::{DateTime, Datelike, NaiveDate, Weekday};

/// Lenient calendar-day parsing for values read back from storage.
///
/// Accepts `YYYY-MM-DD` (surrounding whitespace ignored) or an RFC 3339
/// timestamp, whose calendar date is taken as written. Anything else is
/// `None`, which callers treat as "outside every range".
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(day);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// `DD/MM/YYYY`, the layout printed on Arabic reports.
pub fn format_dmy(day: NaiveDate) -> String {
    day.format("%d/%m/%Y").to_string()
}

pub fn arabic_weekday(day: NaiveDate) -> &'static str {
    match day.weekday() {
        Weekday::Sat => "السبت",
        Weekday::Sun => "الأحد",
        Weekday::Mon => "الاثنين",
        Weekday::Tue => "الثلاثاء",
        Weekday::Wed => "الأربعاء",
        Weekday::Thu => "الخميس",
        Weekday::Fri => "الجمعة",
    }
}
