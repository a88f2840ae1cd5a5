//! Error types shared by the quote core and the explorer binary.
//!
//! The `QuoteError` enum covers the only places where things can go wrong: parsing
//! and validating input that crosses the boundary (catalog names, filter pairs,
//! uploaded quotes, line commands) and the I/O and JSON plumbing around the event
//! loop. Store mutations themselves never fail.
use std::io;

use thiserror::Error;

/// Unified error type for the workspace.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// I/O error while reading commands from stdin or a script file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Service name that is not part of the catalog.
    #[error("Unknown service: {0}")]
    UnknownService(String),

    /// Company name that is not part of the catalog.
    #[error("Unknown company: {0}")]
    UnknownCompany(String),

    /// Filter key other than `service`, `price` or `rating`.
    #[error("Unknown filter key: {0}")]
    UnknownFilterKey(String),

    /// Filter value that does not parse for its key.
    #[error("Invalid value {value:?} for filter {key}")]
    InvalidFilterValue {
        /// Filter key the value was given for.
        key: String,
        /// Raw value as supplied.
        value: String,
    },

    /// Component rating outside `1..=10`.
    #[error("Rating out of range (1..=10): {0}")]
    RatingOutOfRange(u8),

    /// Quote whose creation date is later than its quote date.
    #[error("Quote {id}: creation date is after the quote date")]
    CreationAfterQuoteDate {
        /// Id of the rejected quote.
        id: u32,
    },

    /// No quote with this id in the store.
    #[error("Quote not found: {0}")]
    QuoteNotFound(u32),

    /// Line command that the explorer does not understand.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
