//! Formatting of raw bill values for display.
//!
//! `format_date` is fallible. Callers formatting a list handle a bad date per record.

use crate::model::Status;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::fmt::{Display, Formatter};

/// The first three letters of the capitalized French short month names.
const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// The error returned when a string cannot be understood as a date.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DateError {
    input: String,
}

impl DateError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Display for DateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid date '{}'", self.input)
    }
}

impl std::error::Error for DateError {}

/// Parses an ISO-8601 style date. Accepts `YYYY-MM-DD`, RFC 3339 timestamps and
/// `YYYY-MM-DDTHH:MM:SS[.fff]`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateError> {
    let s = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    Err(DateError {
        input: raw.to_string(),
    })
}

/// Formats a raw date for display, e.g. `2004-04-04` becomes `4 Avr. 04`.
pub fn format_date(raw: &str) -> Result<String, DateError> {
    let date = parse_date(raw)?;
    Ok(format!(
        "{} {}. {:02}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year().rem_euclid(100)
    ))
}

/// Maps a raw status to its display label. Unknown values are returned unchanged.
pub fn format_status(raw: &str) -> String {
    match raw.parse::<Status>() {
        Ok(status) => status.label().to_string(),
        Err(_) => raw.to_string(),
    }
}
