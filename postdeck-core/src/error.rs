//! Error types for the postdeck ecosystem.

use thiserror::Error;

/// Errors surfaced by the calendar core.
///
/// None of these are fatal to the process: a failed fetch leaves the
/// previously displayed data intact, and a malformed record only ever
/// costs that one record.
#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Invalid period: month {0} is not in 1-12")]
    InvalidPeriod(u32),

    #[error("Malformed post {id}: {reason}")]
    MalformedPost { id: String, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Result type alias for postdeck operations.
pub type DeckResult<T> = Result<T, DeckError>;
