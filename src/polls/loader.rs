//! Poll CSV loading
//!
//! Downloads the published CSV and decodes it into [`PollRow`]s.
//! Columns beyond the ones listed in [`PollRecord`] are ignored.

use chrono::{Datelike, Local};
use reqwest::Client;
use serde::Deserialize;
use std::io::Read;
use std::time::Duration;

use super::dates::parse_date_range_in_year;
use super::error::{PollError, PollResult};
use super::types::PollRow;

/// One CSV record as published
#[derive(Debug, Deserialize)]
struct PollRecord {
    category: String,
    dates: String,
    yes: f64,
    no: f64,
    net: f64,
    question: String,
}

/// Download the CSV body from `url`
pub async fn fetch_csv(url: &str, timeout: Duration) -> PollResult<String> {
    let client = Client::builder().timeout(timeout).build()?;

    tracing::info!(url = %url, "Fetching poll data");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(PollError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    tracing::debug!(bytes = body.len(), "Poll data downloaded");
    Ok(body)
}

/// Decode poll rows, inferring date-range years from the current year
pub fn parse_polls<R: Read>(reader: R) -> PollResult<Vec<PollRow>> {
    parse_polls_in_year(reader, Local::now().year())
}

/// Decode poll rows with date ranges anchored in `year`
///
/// A non-numeric percentage or an impossible date fails the whole load.
/// Unrecognised date text leaves the row's dates missing.
pub fn parse_polls_in_year<R: Read>(reader: R, year: i32) -> PollResult<Vec<PollRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut undated = 0usize;

    for result in reader.deserialize::<PollRecord>() {
        let record = result?;
        let range = parse_date_range_in_year(&record.dates, year)?;
        if range.is_none() {
            undated += 1;
            tracing::debug!(dates = %record.dates, "Unrecognised date range");
        }

        rows.push(
            PollRow::new(
                record.category,
                record.dates,
                record.yes,
                record.no,
                record.net,
                record.question,
            )
            .with_range(range),
        );
    }

    if undated > 0 {
        tracing::warn!(
            rows = undated,
            "Rows with unrecognised date ranges are left out of the trend aggregates"
        );
    }

    Ok(rows)
}

/// Import from a CSV string (useful for testing)
pub fn parse_polls_str(csv_data: &str, year: i32) -> PollResult<Vec<PollRow>> {
    parse_polls_in_year(csv_data.as_bytes(), year)
}
