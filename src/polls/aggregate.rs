//! Aggregation of poll rows
//!
//! Three pure reductions, each producing an independent table:
//! - [`by_category_and_date`]: mean yes/no/net per (category, end date)
//! - [`by_date`]: mean yes/no/net per end date across all categories
//! - [`summarize`]: mean of the per-date means per category, best net first
//!
//! Rows without an end date have no group key and are left out.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::types::{AggregateRow, PollRow, SummaryRow};

/// Running sums for one group
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    yes: f64,
    no: f64,
    net: f64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, yes: f64, no: f64, net: f64) {
        self.yes += yes;
        self.no += no;
        self.net += net;
        self.count += 1;
    }

    /// (mean yes, mean no, mean net)
    fn means(&self) -> (f64, f64, f64) {
        let n = self.count as f64;
        (self.yes / n, self.no / n, self.net / n)
    }
}

/// Group by (category, end date), ordered by category then date
pub fn by_category_and_date(rows: &[PollRow]) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<(&str, NaiveDate), Accumulator> = BTreeMap::new();

    for row in rows {
        if let Some(end_date) = row.end_date {
            groups
                .entry((row.category.as_str(), end_date))
                .or_default()
                .add(row.yes, row.no, row.net);
        }
    }

    groups
        .into_iter()
        .map(|((category, end_date), acc)| {
            let (yes, no, net) = acc.means();
            AggregateRow {
                category: Some(category.to_string()),
                end_date,
                yes,
                no,
                net,
            }
        })
        .collect()
}

/// Group by end date across every category, ordered by date
pub fn by_date(rows: &[PollRow]) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();

    for row in rows {
        if let Some(end_date) = row.end_date {
            groups
                .entry(end_date)
                .or_default()
                .add(row.yes, row.no, row.net);
        }
    }

    groups
        .into_iter()
        .map(|(end_date, acc)| {
            let (yes, no, net) = acc.means();
            AggregateRow {
                category: None,
                end_date,
                yes,
                no,
                net,
            }
        })
        .collect()
}

/// Reduce per-(category, date) means to one row per category
///
/// Each date counts once regardless of how many questions were asked on it.
/// Sorted by descending net; equal nets keep category order.
pub fn summarize(grouped: &[AggregateRow]) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();

    for row in grouped {
        let category = row.category.as_deref().unwrap_or_default();
        groups
            .entry(category)
            .or_default()
            .add(row.yes, row.no, row.net);
    }

    let mut summary: Vec<SummaryRow> = groups
        .into_iter()
        .map(|(category, acc)| {
            let (yes, no, net) = acc.means();
            SummaryRow {
                category: category.to_string(),
                yes,
                no,
                net,
            }
        })
        .collect();

    summary.sort_by(|a, b| b.net.total_cmp(&a.net));
    summary
}
