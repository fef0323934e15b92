//! Errors raised around the planning engine.
//!
//! The numeric engine in [`crate::core`] is total and never fails. These
//! variants cover the fallible collaborators and process setup.

use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Transport or HTTP failure talking to a text-generation service
    #[error("LLM request failed: {service}: {error}")]
    Llm { service: String, error: String },

    #[error("{service} returned an empty response")]
    EmptyResponse { service: String },

    /// Suggestion lists that cannot be used as-is
    #[error("Invalid suggestions: {reason}")]
    InvalidSuggestions { reason: String },

    #[error("Operation timed out after {duration:?}")]
    Timeout { duration: Duration },

    #[error("Configuration error: {0}")]
    Config(String),

    /// Profile rejected at the boundary, before any computation
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
