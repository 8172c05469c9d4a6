//! Cash count and daily closing arithmetic.
//!
//! The cash count sheet lists notes per Gulf currency, converts every currency
//! to Qatari riyal at a fixed rate and adds the ATM takings. The closing sheet
//! splits the day's ATM and cash totals between the cargo desk and tourists.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use utoipa::ToSchema;

use crate::utils::overtime::parse_any_number;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    Qar,
    Sar,
    Aed,
    Kwd,
    Bhd,
    Omr,
}

impl Currency {
    pub fn arabic_name(self) -> &'static str {
        match self {
            Currency::Qar => "ريال قطري",
            Currency::Sar => "ريال سعودي",
            Currency::Aed => "درهم إماراتي",
            Currency::Kwd => "دينار كويتي",
            Currency::Bhd => "دينار بحريني",
            Currency::Omr => "ريال عماني",
        }
    }

    /// Notes and coins on the sheet, largest first.
    pub fn denominations(self) -> &'static [f64] {
        match self {
            Currency::Qar | Currency::Sar => &[500.0, 200.0, 100.0, 50.0, 20.0, 10.0, 5.0, 1.0],
            Currency::Aed => &[1000.0, 500.0, 200.0, 100.0, 50.0, 20.0, 10.0, 5.0],
            Currency::Kwd => &[20.0, 10.0, 5.0, 1.0, 0.5, 0.25],
            Currency::Bhd => &[20.0, 10.0, 5.0, 1.0, 0.5],
            Currency::Omr => &[50.0, 20.0, 10.0, 5.0, 1.0, 0.5, 0.1],
        }
    }

    /// Riyal value of one unit.
    pub fn rate_to_qar(self) -> f64 {
        match self {
            Currency::Qar => 1.0,
            Currency::Sar | Currency::Aed => 0.9,
            Currency::Kwd => 10.5,
            Currency::Omr | Currency::Bhd => 9.0,
        }
    }

    /// Table entry matching a typed denomination such as `"0.5"`.
    pub fn denomination(self, raw: &str) -> Option<f64> {
        let value: f64 = raw.trim().parse().ok()?;
        self.denominations()
            .iter()
            .copied()
            .find(|d| (d - value).abs() < 1e-9)
    }
}

/// Rounds to the nearest cent.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Number of notes typed into a count cell. Blank or unreadable is 0 and any
/// fraction is dropped.
pub fn parse_count(raw: &str) -> f64 {
    parse_any_number(raw).trunc()
}

/// Reads a signed amount typed on the closing sheet.
///
/// The first `-?[digits,]+(.digits)?` run is used with thousands separators
/// removed. Arabic-Indic digits are accepted. Blank or unreadable input is 0.
pub fn parse_signed_amount(raw: &str) -> f64 {
    let chars: Vec<char> = raw
        .chars()
        .map(|c| match c {
            '٠'..='٩' => char::from_digit(c as u32 - '٠' as u32, 10).unwrap_or(c),
            _ => c,
        })
        .collect();

    let is_integer_part = |c: &char| c.is_ascii_digit() || *c == ',';
    let Some(start) = chars.iter().position(is_integer_part) else {
        return 0.0;
    };
    let end = start
        + chars[start..]
            .iter()
            .take_while(|c| is_integer_part(*c))
            .count();

    let mut number: String = chars[start..end].iter().filter(|c| **c != ',').collect();
    if chars.get(end) == Some(&'.') && chars.get(end + 1).is_some_and(char::is_ascii_digit) {
        number.push('.');
        number.extend(chars[end + 1..].iter().take_while(|c| c.is_ascii_digit()));
    }

    let value = number.parse::<f64>().unwrap_or(0.0);
    if start > 0 && chars[start - 1] == '-' {
        -value
    } else {
        value
    }
}

/// Native total of one currency from its `denomination -> count` cells.
///
/// Fails with the offending key when a cell names a denomination the
/// currency does not have.
pub fn currency_total(currency: Currency, counts: &HashMap<String, String>) -> Result<f64, String> {
    counts.iter().try_fold(0.0, |total, (denomination, count)| -> Result<f64, String> {
        let value = currency
            .denomination(denomination)
            .ok_or_else(|| denomination.clone())?;
        Ok(total + value * parse_count(count))
    })
}

/// Sum of native totals converted to riyal.
pub fn grand_total_qar(totals: impl IntoIterator<Item = (Currency, f64)>) -> f64 {
    totals
        .into_iter()
        .map(|(currency, total)| total * currency.rate_to_qar())
        .sum()
}

/// Figures derived from one day's closing sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClosingTotals {
    pub cargo_atm: f64,
    pub cargo_cash: f64,
    pub tourist_atm: f64,
    pub tourist_cash: f64,
    /// Total ATM plus total cash
    pub grand_total: f64,
    pub total_cars: f64,
}

/// Raw closing sheet cells, already parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosingSheet {
    pub cargo_atm: [f64; 2],
    pub cargo_cash: [f64; 2],
    pub total_atm: f64,
    pub total_cash: f64,
    pub cars_tourist: f64,
    pub cars_cargo: f64,
}

/// Tourist takings are whatever of the day's totals the cargo desk did not
/// take in. They go negative when cargo exceeds the total.
pub fn closing_totals(sheet: &ClosingSheet) -> ClosingTotals {
    let cargo_atm = sheet.cargo_atm.iter().sum::<f64>();
    let cargo_cash = sheet.cargo_cash.iter().sum::<f64>();
    ClosingTotals {
        cargo_atm: round_cents(cargo_atm),
        cargo_cash: round_cents(cargo_cash),
        tourist_atm: round_cents(sheet.total_atm - cargo_atm),
        tourist_cash: round_cents(sheet.total_cash - cargo_cash),
        grand_total: round_cents(sheet.total_atm + sheet.total_cash),
        total_cars: sheet.cars_tourist + sheet.cars_cargo,
    }
}
