//! Overtime sheet arithmetic.

use crate::models::DateRange;
use crate::utils::date_utils::arabic_weekday;

/// Overtime is paid at time and a half.
pub const OVERTIME_MULTIPLIER: f64 = 1.5;
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const HOURS_PER_DAY: f64 = 8.0;
/// Longest period one overtime sheet may cover.
pub const MAX_SHEET_DAYS: u32 = 366;

/// Reads a number typed into a form cell.
///
/// Arabic-Indic digits are accepted, any other non-numeric character is
/// dropped, and the longest leading `digits[.digits]` run is used. Blank or
/// unreadable input is 0.
pub fn parse_any_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter_map(|c| match c {
            '٠'..='٩' => char::from_digit(c as u32 - '٠' as u32, 10),
            '0'..='9' | '.' => Some(c),
            _ => None,
        })
        .collect();

    let mut seen_dot = false;
    let prefix: String = cleaned
        .chars()
        .take_while(|c| {
            if *c == '.' {
                if seen_dot {
                    return false;
                }
                seen_dot = true;
            }
            true
        })
        .collect();

    prefix.parse::<f64>().unwrap_or(0.0)
}

/// Pay for `total_hours` of overtime on a monthly `salary`, rounded to a
/// whole amount.
pub fn overtime_amount(salary: f64, total_hours: f64) -> i64 {
    if salary == 0.0 || total_hours == 0.0 {
        return 0;
    }
    let hourly_rate = salary / DAYS_PER_MONTH / HOURS_PER_DAY;
    (hourly_rate * OVERTIME_MULTIPLIER * total_hours).round() as i64
}

/// Sum of the per-day hour cells of one sheet row.
pub fn total_hours(days: &[String]) -> f64 {
    days.iter().map(|d| parse_any_number(d)).sum()
}

/// Pads with `"0"` or truncates so a row has one cell per day of the sheet.
pub fn fit_days(days: &mut Vec<String>, len: usize) {
    days.resize(len, "0".to_string());
}

/// Column headers of a sheet covering `range`: Arabic weekday names.
pub fn day_headers(range: DateRange) -> Vec<&'static str> {
    range.days().map(arabic_weekday).collect()
}
