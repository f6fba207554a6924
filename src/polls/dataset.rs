//! The loaded dataset
//!
//! [`Dataset`] holds the raw rows and every derived table. It is built once
//! at startup and shared read-only (behind an `Arc`) for the life of the
//! process; the selection-driven views below are pure functions of it.

use serde::Serialize;
use std::time::Duration;

use super::aggregate;
use super::color::{highlight_rules, HighlightRule};
use super::error::PollResult;
use super::loader;
use super::types::{AggregateRow, PollRow, Selection, SummaryRow, ALL_CATEGORIES};

/// Rows for the question table plus their net highlights
#[derive(Debug, Clone, Serialize)]
pub struct QuestionTable {
    pub rows: Vec<PollRow>,
    pub highlights: Vec<HighlightRule>,
}

/// Summary rows plus their net highlights
#[derive(Debug, Clone, Serialize)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
    pub highlights: Vec<HighlightRule>,
}

/// Immutable poll data with its derived aggregates
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<PollRow>,
    by_category_and_date: Vec<AggregateRow>,
    by_date: Vec<AggregateRow>,
    summary: Vec<SummaryRow>,
    categories: Vec<String>,
}

impl Dataset {
    /// Build the dataset and all derived tables from decoded rows
    pub fn from_rows(rows: Vec<PollRow>) -> Self {
        let by_category_and_date = aggregate::by_category_and_date(&rows);
        let by_date = aggregate::by_date(&rows);
        let summary = aggregate::summarize(&by_category_and_date);

        let mut categories: Vec<String> = Vec::new();
        for row in &rows {
            if !categories.iter().any(|c| c == &row.category) {
                categories.push(row.category.clone());
            }
        }

        tracing::info!(
            rows = rows.len(),
            categories = categories.len(),
            dates = by_date.len(),
            "Dataset built"
        );

        Self {
            rows,
            by_category_and_date,
            by_date,
            summary,
            categories,
        }
    }

    /// Fetch the CSV at `url` and build the dataset
    pub async fn load(url: &str, timeout: Duration) -> PollResult<Self> {
        let body = loader::fetch_csv(url, timeout).await?;
        let rows = loader::parse_polls(body.as_bytes())?;
        Ok(Self::from_rows(rows))
    }

    /// Raw rows in load order
    pub fn rows(&self) -> &[PollRow] {
        &self.rows
    }

    pub fn by_category_and_date(&self) -> &[AggregateRow] {
        &self.by_category_and_date
    }

    pub fn by_date(&self) -> &[AggregateRow] {
        &self.by_date
    }

    /// Per-category means, best net first
    pub fn summary(&self) -> &[SummaryRow] {
        &self.summary
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Selector values: "All" followed by every category
    pub fn selector_options(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(self.categories.iter().cloned())
            .collect()
    }

    /// Summary table with highlights
    pub fn summary_table(&self) -> SummaryTable {
        SummaryTable {
            rows: self.summary.clone(),
            highlights: highlight_rules(self.summary.iter().map(|r| r.net)),
        }
    }

    /// Aggregate rows feeding the trend chart
    ///
    /// "All" uses the all-categories table; a category uses its slice of the
    /// per-category table.
    pub fn trend_source(&self, selection: &Selection) -> Vec<AggregateRow> {
        match selection {
            Selection::All => self.by_date.clone(),
            Selection::Category(category) => self
                .by_category_and_date
                .iter()
                .filter(|r| r.category.as_deref() == Some(category.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Question rows for a selection with a highlight per row
    ///
    /// "All" keeps load order. A single category is sorted by ascending end
    /// date, with undated rows last.
    pub fn questions(&self, selection: &Selection) -> QuestionTable {
        let rows: Vec<PollRow> = match selection {
            Selection::All => self.rows.clone(),
            Selection::Category(_) => {
                let mut rows: Vec<PollRow> = self
                    .rows
                    .iter()
                    .filter(|r| selection.matches(&r.category))
                    .cloned()
                    .collect();
                rows.sort_by_key(|r| (r.end_date.is_none(), r.end_date));
                rows
            }
        };

        let highlights = highlight_rules(rows.iter().map(|r| r.net));
        QuestionTable { rows, highlights }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
