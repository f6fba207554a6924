//! Trend figure model
//!
//! A renderer-independent description of the trend line chart: yes% and no%
//! over end date with fixed styling. Served as JSON and rendered to SVG by
//! [`super::chart`].

use chrono::NaiveDate;
use serde::Serialize;

use crate::polls::{AggregateRow, Selection};

/// Plot theme name, kept compatible with the plotly template of the same name
pub const TEMPLATE: &str = "plotly_white";

/// One (date, value) point of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// A named line series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub points: Vec<TrendPoint>,
}

/// Outer margins in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

/// Fixed chart styling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureLayout {
    pub title: String,
    pub template: &'static str,
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub legend_title: &'static str,
    pub font_size: u32,
    pub margin: Margin,
    pub markers: bool,
}

/// The complete trend chart for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendFigure {
    pub selection: String,
    pub layout: FigureLayout,
    pub series: Vec<Series>,
}

impl TrendFigure {
    /// Build the figure from the aggregate rows chosen for `selection`
    pub fn build(selection: &Selection, rows: &[AggregateRow]) -> Self {
        let series = vec![
            Series {
                name: "yes".to_string(),
                color: "#636efa".to_string(),
                points: rows
                    .iter()
                    .map(|r| TrendPoint {
                        date: r.end_date,
                        value: r.yes,
                    })
                    .collect(),
            },
            Series {
                name: "no".to_string(),
                color: "#ef553b".to_string(),
                points: rows
                    .iter()
                    .map(|r| TrendPoint {
                        date: r.end_date,
                        value: r.no,
                    })
                    .collect(),
            },
        ];

        Self {
            selection: selection.to_string(),
            layout: FigureLayout {
                title: format!("Poll Trend for {}", selection),
                template: TEMPLATE,
                x_title: "Date",
                y_title: "Percentage (%)",
                legend_title: "Response",
                font_size: 14,
                margin: Margin {
                    left: 40,
                    right: 40,
                    top: 40,
                    bottom: 40,
                },
                markers: true,
            },
            series,
        }
    }

    /// True when no series has a point
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Earliest and latest date across all series
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.date));
        let min = dates.clone().min()?;
        let max = dates.max()?;
        Some((min, max))
    }

    /// Smallest and largest value across all series
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for point in self.series.iter().flat_map(|s| &s.points) {
            bounds = Some(match bounds {
                None => (point.value, point.value),
                Some((lo, hi)) => (lo.min(point.value), hi.max(point.value)),
            });
        }
        bounds
    }
}
