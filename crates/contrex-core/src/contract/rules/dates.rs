//! Date parsing for Brazilian contract text.

use chrono::NaiveDate;
use regex::Regex;

use super::patterns::DATA_LONGA;

/// Month-name table for Portuguese long-form dates.
const MESES: [(&str, u32); 12] = [
    ("janeiro", 1),
    ("fevereiro", 2),
    ("março", 3),
    ("abril", 4),
    ("maio", 5),
    ("junho", 6),
    ("julho", 7),
    ("agosto", 8),
    ("setembro", 9),
    ("outubro", 10),
    ("novembro", 11),
    ("dezembro", 12),
];

/// Numeric formats tried in order after the long form.
const FORMATOS_NUMERICOS: [&str; 5] = ["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%Y/%m/%d"];

/// Parse a date as written in Portuguese contracts.
///
/// Tries the long form ("24 de outubro de 2023") against the month-name
/// table first, then the fixed list of numeric formats. Returns `None` for
/// anything unparseable, including calendar-invalid dates.
pub fn parse_date_pt(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Some(caps) = DATA_LONGA.captures(value) {
        let day: u32 = caps[1].parse().ok()?;
        let month_name = caps[2].to_lowercase();
        let year: i32 = caps[3].parse().ok()?;

        if let Some(&(_, month)) = MESES.iter().find(|(name, _)| *name == month_name) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(date);
            }
        }
    }

    FORMATOS_NUMERICOS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Extract a date field: patterns in priority order, first candidate whose
/// capture parses wins, unparseable candidates fall through to the next
/// pattern. The result is an ISO-8601 string.
pub fn extract_date(patterns: &[&Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| parse_date_pt(caps.get(1).map_or("", |m| m.as_str())))
            .map(|date| date.to_string())
    })
}
