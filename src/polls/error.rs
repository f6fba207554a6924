//! Poll pipeline error types
//!
//! Every error here is fatal at load time: the dashboard cannot start
//! without a fully decoded dataset.

use thiserror::Error;

/// Errors that can occur while fetching or decoding poll data
#[derive(Error, Debug)]
pub enum PollError {
    /// The HTTP request for the CSV failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The remote server answered with a non-success status
    #[error("Fetch of {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// CSV decoding failed, including non-numeric percentage fields
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A date range matched the expected shape but names an impossible date
    #[error("Invalid date in {text:?}: {reason}")]
    InvalidDate { text: String, reason: String },
}

/// Result type alias for poll pipeline operations
pub type PollResult<T> = Result<T, PollError>;
