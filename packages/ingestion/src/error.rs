//! Typed errors for the ingestion library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur while scraping and extracting a supplier page.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The target URL could not be parsed
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The target responded with a non-success status
    #[error("failed to fetch {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },

    /// AI service unavailable or failed
    #[error("AI service error: {0}")]
    AI(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The model's response did not match the extraction schema
    #[error("extraction produced invalid data: {0}")]
    InvalidExtraction(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
