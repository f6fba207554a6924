//! Date-range parsing
//!
//! Poll field dates arrive as free text such as `"Jan. 3 - 10"` or
//! `"Dec. 29 - Jan. 5"`. The year is never written, so it is inferred from
//! the load date, and a range whose end falls before its start is taken to
//! cross into the next year.

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

use super::error::{PollError, PollResult};
use super::types::DateRange;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\w{3})\. (\d+) - (?:(\w{3})\. )?(\d+)").expect("date range pattern is valid")
    })
}

/// Parse a date range using the current local year
pub fn parse_date_range(text: &str) -> PollResult<Option<DateRange>> {
    parse_date_range_in_year(text, Local::now().year())
}

/// Parse a date range, placing the start date in `year`
///
/// Returns `Ok(None)` when the text does not have the range shape at all.
/// Text that has the shape but names an impossible date is an error.
pub fn parse_date_range_in_year(text: &str, year: i32) -> PollResult<Option<DateRange>> {
    let caps = match range_pattern().captures(text) {
        Some(caps) => caps,
        None => return Ok(None),
    };

    let start_month = &caps[1];
    let end_month = caps.get(3).map(|m| m.as_str()).unwrap_or(start_month);

    let start = build_date(text, start_month, &caps[2], year)?;
    let mut end = build_date(text, end_month, &caps[4], year)?;

    if end < start {
        end = end
            .with_year(start.year() + 1)
            .ok_or_else(|| invalid(text, "end date does not exist in the following year"))?;
    }

    Ok(Some(DateRange { start, end }))
}

fn build_date(text: &str, month: &str, day: &str, year: i32) -> PollResult<NaiveDate> {
    let month = month_number(month)
        .ok_or_else(|| invalid(text, &format!("unknown month {:?}", month)))?;
    let day: u32 = day
        .parse()
        .map_err(|_| invalid(text, &format!("bad day {:?}", day)))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| invalid(text, &format!("day {} out of range for month {}", day, month)))
}

fn month_number(token: &str) -> Option<u32> {
    let lower = token.to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == lower)
        .map(|idx| idx as u32 + 1)
}

fn invalid(text: &str, reason: &str) -> PollError {
    PollError::InvalidDate {
        text: text.to_string(),
        reason: reason.to_string(),
    }
}
