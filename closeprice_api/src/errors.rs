//! Error types for the chart client.

/// Errors that can occur when requesting chart data.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unexpected response).
    #[error("Request failed")]
    RequestFailed,
    /// The symbol is unknown to the upstream provider (HTTP 404).
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was well-formed but carried an upstream error object.
    #[error("Upstream error {code}: {description}")]
    Upstream { code: String, description: String },
    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
}
