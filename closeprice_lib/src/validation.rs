//! Request parsing and validation.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::PriceHistoryError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The three raw fields of an inbound request, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockRequest {
    pub ticker: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// A validated query. `start_date < end_date` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockQuery {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl StockRequest {
    pub fn new(ticker: &str, start_date: &str, end_date: &str) -> Self {
        Self {
            ticker: Some(ticker.to_string()),
            start_date: Some(start_date.to_string()),
            end_date: Some(end_date.to_string()),
        }
    }

    /// Reads the fields from a JSON body.
    ///
    /// A body that is not a JSON object yields a request with every field
    /// absent. Numeric tickers are taken in their textual form. Non-string
    /// date values are kept as their JSON text so they fail date parsing
    /// rather than presence checks.
    pub fn from_json(body: &[u8]) -> Self {
        let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };

        let ticker = map.get("ticker").and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        let date_field = |key: &str| {
            map.get(key).and_then(|v| match v {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
        };

        Self {
            ticker,
            start_date: date_field("start_date"),
            end_date: date_field("end_date"),
        }
    }
}

/// Validates presence, then date format, then date ordering.
pub fn validate_request(request: &StockRequest) -> Result<StockQuery, PriceHistoryError> {
    let ticker = request
        .ticker
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(PriceHistoryError::MissingParameter)?;
    let start = non_empty(request.start_date.as_deref())?;
    let end = non_empty(request.end_date.as_deref())?;

    let start_date = parse_date(start)?;
    let end_date = parse_date(end)?;

    if start_date >= end_date {
        return Err(PriceHistoryError::InvalidDateRange);
    }

    Ok(StockQuery {
        ticker: ticker.to_string(),
        start_date,
        end_date,
    })
}

fn non_empty(value: Option<&str>) -> Result<&str, PriceHistoryError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(PriceHistoryError::MissingParameter)
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, PriceHistoryError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| PriceHistoryError::InvalidDateFormat)
}
