//! Poll data pipeline
//!
//! Fetch, decode, and reshape the issue-polling CSV.
//!
//! # Architecture
//!
//! ```text
//! remote CSV ──► loader ──► PollRow (dates parsed by `dates`)
//!                                │
//!                                ▼
//!                           aggregate ──► per (category, date) ──► summary
//!                                │
//!                                └──────► per date (all categories)
//!
//!                           Dataset (immutable, shared via Arc)
//!                                │
//!                 Selection ─────┴──► trend source / question table
//! ```

pub mod aggregate;
pub mod color;
pub mod dataset;
pub mod dates;
pub mod error;
pub mod loader;
pub mod types;

pub use color::{net_color, HighlightRule, Rgb};
pub use dataset::{Dataset, QuestionTable, SummaryTable};
pub use dates::{parse_date_range, parse_date_range_in_year};
pub use error::{PollError, PollResult};
pub use types::{AggregateRow, DateRange, PollRow, Selection, SummaryRow, ALL_CATEGORIES};
