//! # Approval Trends
//!
//! A single-page dashboard of issue polling: downloads the published CSV,
//! aggregates it by category and date, and serves a summary table, a trend
//! chart, and a question table driven by a category selector.
//!
//! ## Modules
//!
//! - [`polls`]: Fetching, date parsing, aggregation, and the color scale
//! - [`web`]: Page layout and trend chart rendering
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use approval_trends::polls::{Dataset, Selection};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Dataset::load(
//!         "https://example.com/polls.csv",
//!         Duration::from_secs(30),
//!     )
//!     .await?;
//!
//!     for row in dataset.summary() {
//!         println!("{:<20} net {:+.1}", row.category, row.net);
//!     }
//!
//!     let economy = dataset.questions(&Selection::parse("Economy"));
//!     println!("{} economy questions", economy.rows.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod polls;
pub mod web;

pub use polls::{
    AggregateRow, DateRange, Dataset, HighlightRule, PollError, PollResult, PollRow,
    QuestionTable, Rgb, Selection, SummaryRow, SummaryTable,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig, SourceConfig};

pub use web::{render_page, render_svg, ChartError, TrendFigure};
