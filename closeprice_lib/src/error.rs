//! Error types for the pipeline.

use serde::Serialize;
use thiserror::Error;

/// Classification of a pipeline failure, used to pick the response status.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingParameter,
    InvalidDateFormat,
    InvalidDateRange,
    NoDataFound,
    UpstreamUnavailable,
    InternalError,
}

impl ErrorKind {
    /// HTTP status code reported for this kind.
    pub fn status_code(self) -> u16 {
        match self {
            Self::MissingParameter | Self::InvalidDateFormat | Self::InvalidDateRange => 400,
            Self::NoDataFound => 404,
            Self::UpstreamUnavailable | Self::InternalError => 500,
        }
    }
}

/// Errors produced while turning a request into a price series.
///
/// `Display` is the message exposed to clients. `Internal` keeps its detail
/// for logging only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceHistoryError {
    #[error("Missing required parameters")]
    MissingParameter,
    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDateFormat,
    #[error("Start date must be before end date")]
    InvalidDateRange,
    #[error(
        "No data found for the given ticker and date range (tried: {})",
        .attempted.join(", ")
    )]
    NoDataFound { attempted: Vec<String> },
    /// A single upstream lookup failed. Absorbed by the resolver.
    #[error("Upstream lookup for {symbol} failed: {reason}")]
    UpstreamUnavailable { symbol: String, reason: String },
    #[error("Internal server error")]
    Internal(String),
}

impl PriceHistoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingParameter => ErrorKind::MissingParameter,
            Self::InvalidDateFormat => ErrorKind::InvalidDateFormat,
            Self::InvalidDateRange => ErrorKind::InvalidDateRange,
            Self::NoDataFound { .. } => ErrorKind::NoDataFound,
            Self::UpstreamUnavailable { .. } => ErrorKind::UpstreamUnavailable,
            Self::Internal(_) => ErrorKind::InternalError,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}
