//! Error types
//!
//! Nothing here is fatal: a payload error only means a clipboard format is
//! unusable and the controller falls through to the next one.

use thiserror::Error;

/// Failure to read or write a structured (Delta JSON) clipboard payload
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The slot was missing or blank
    #[error("Structured payload is empty")]
    Empty,

    /// The slot did not hold a valid operation sequence
    #[error("Invalid structured payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
