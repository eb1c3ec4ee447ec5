//! Error types for Tiingo API operations.

use thiserror::Error;

/// Errors from Tiingo API operations.
#[derive(Error, Debug)]
pub enum TiingoError {
    #[error("Rate limited by Tiingo API")]
    RateLimited,
    #[error("Invalid API key (HTTP 401)")]
    InvalidApiKey,
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    #[error("Network error")]
    Network(#[from] reqwest::Error),
}
