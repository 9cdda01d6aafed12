//! Date normalization and validation for passport fields.
//!
//! Passports print dates day-first. OCR often swaps the separator or drops a
//! leading zero, so normalization rewrites `1.2.1990` or `01-02-1990` into
//! `01/02/1990`; validation then accepts only `DD/MM/YYYY` naming a real
//! calendar day.

use chrono::{Datelike, NaiveDate};

use super::patterns::DATE_DMY;

/// Normalize a captured date token to `DD/MM/YYYY` shape where possible.
///
/// Tokens that do not split into three parts are returned trimmed and left for
/// the validator to reject.
pub fn normalize_date(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| if c == '.' || c == '-' { '/' } else { c })
        .collect();

    let parts: Vec<&str> = cleaned.split('/').collect();
    if parts.len() != 3 {
        return cleaned;
    }

    format!(
        "{}/{}/{}",
        pad_two(parts[0]),
        pad_two(parts[1]),
        parts[2]
    )
}

fn pad_two(part: &str) -> String {
    if part.len() == 1 {
        format!("0{}", part)
    } else {
        part.to_string()
    }
}

/// Parse a normalized `DD/MM/YYYY` value.
pub fn parse_date(candidate: &str) -> Option<NaiveDate> {
    let caps = DATE_DMY.captures(candidate)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Accept a calendar-valid `DD/MM/YYYY` date.
///
/// With `not_after_current_year`, the year must not exceed `today`'s year.
pub fn validate_date(candidate: &str, not_after_current_year: bool, today: NaiveDate) -> bool {
    match parse_date(candidate) {
        Some(date) => !not_after_current_year || date.year() <= today.year(),
        None => false,
    }
}
