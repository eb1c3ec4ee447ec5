//! Terminal pipeline values and their mapping to status codes and payloads.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, PriceHistoryError};

/// One normalized observation: `{"Date": "YYYY-MM-DD", "Close": 123.46}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PricePoint {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Close")]
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    Success { points: Vec<PricePoint> },
    Failure { kind: ErrorKind, message: String },
}

impl From<PriceHistoryError> for ApiResult {
    fn from(err: PriceHistoryError) -> Self {
        ApiResult::Failure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<Result<Vec<PricePoint>, PriceHistoryError>> for ApiResult {
    fn from(result: Result<Vec<PricePoint>, PriceHistoryError>) -> Self {
        match result {
            Ok(points) => ApiResult::Success { points },
            Err(err) => err.into(),
        }
    }
}

impl ApiResult {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiResult::Success { .. } => 200,
            ApiResult::Failure { kind, .. } => kind.status_code(),
        }
    }
}

/// JSON payload: `{"data": [...]}` or `{"error": "..."}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ResponseBody {
    Data { data: Vec<PricePoint> },
    Error { error: String },
}

/// Status code plus payload, ready for the HTTP layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn internal_error() -> Self {
        build_response(PriceHistoryError::Internal(String::new()).into())
    }
}

pub fn build_response(result: ApiResult) -> ApiResponse {
    let status = result.status_code();
    let body = match result {
        ApiResult::Success { points } => ResponseBody::Data { data: points },
        ApiResult::Failure { message, .. } => ResponseBody::Error { error: message },
    };
    ApiResponse { status, body }
}
