//! Core data types for the poll pipeline
//!
//! - `PollRow`: one decoded polling record with its derived date range
//! - `DateRange`: start/end calendar dates parsed from free text
//! - `AggregateRow` / `SummaryRow`: the derived mean tables
//! - `Selection`: the category selector value driving both views

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of the selector option covering every category
pub const ALL_CATEGORIES: &str = "All";

/// A concrete start/end pair parsed from a "Jan. 3 - 10" style range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A single polling record
///
/// Rows are immutable once loaded. `start_date`/`end_date` are `None` when
/// the `dates` text did not match the expected range shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollRow {
    pub category: String,
    pub dates: String,
    pub yes: f64,
    pub no: f64,
    pub net: f64,
    pub question: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl PollRow {
    /// Create a row with no derived dates
    pub fn new(
        category: impl Into<String>,
        dates: impl Into<String>,
        yes: f64,
        no: f64,
        net: f64,
        question: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            dates: dates.into(),
            yes,
            no,
            net,
            question: question.into(),
            start_date: None,
            end_date: None,
        }
    }

    /// Builder method: attach a parsed date range
    pub fn with_range(mut self, range: Option<DateRange>) -> Self {
        self.start_date = range.map(|r| r.start);
        self.end_date = range.map(|r| r.end);
        self
    }
}

/// Means of yes/no/net for one end date
///
/// `category` is `None` in the all-categories view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub end_date: NaiveDate,
    pub yes: f64,
    pub no: f64,
    pub net: f64,
}

/// Means of yes/no/net for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub category: String,
    pub yes: f64,
    pub no: f64,
    pub net: f64,
}

/// Category selector value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection {
    /// Every category
    All,
    /// A single named category
    Category(String),
}

impl Selection {
    /// Parse a selector value; "All" selects every category
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Selection::All
        } else {
            Selection::Category(value.to_string())
        }
    }

    /// Check whether a category belongs to this selection
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Category(c) => c == category,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Selection::All
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "{}", ALL_CATEGORIES),
            Selection::Category(c) => write!(f, "{}", c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse("All"), Selection::All);
        assert_eq!(
            Selection::parse("Economy"),
            Selection::Category("Economy".to_string())
        );
        // Case matters, like the selector values themselves
        assert_eq!(
            Selection::parse("all"),
            Selection::Category("all".to_string())
        );
    }

    #[test]
    fn test_selection_matches() {
        assert!(Selection::All.matches("Economy"));
        assert!(Selection::parse("Economy").matches("Economy"));
        assert!(!Selection::parse("Economy").matches("Immigration"));
    }

    #[test]
    fn test_selection_display() {
        assert_eq!(Selection::All.to_string(), "All");
        assert_eq!(Selection::parse("Trade").to_string(), "Trade");
    }

    #[test]
    fn test_row_with_range() {
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        };
        let row = PollRow::new("Economy", "Jan. 3 - 10", 40.0, 50.0, -10.0, "Q")
            .with_range(Some(range));
        assert_eq!(row.start_date, Some(range.start));
        assert_eq!(row.end_date, Some(range.end));

        let row = row.with_range(None);
        assert!(row.start_date.is_none());
        assert!(row.end_date.is_none());
    }
}
