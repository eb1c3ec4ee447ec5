//! The upstream historical-price capability.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::tiingo::TiingoError;

/// One row of an upstream price table.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// Row index as the provider reports it, in exchange-local time.
    pub date: NaiveDateTime,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub adj_close: Option<f64>,
    pub volume: Option<u64>,
}

impl RawRow {
    /// A row carrying only a date and a close.
    pub fn close_only(date: NaiveDateTime, close: f64) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close,
            adj_close: None,
            volume: None,
        }
    }
}

/// A date-indexed price table for one symbol, in upstream (ascending) order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawPriceHistory {
    pub symbol: String,
    pub rows: Vec<RawRow>,
}

impl RawPriceHistory {
    pub fn new(symbol: &str, rows: Vec<RawRow>) -> Self {
        Self {
            symbol: symbol.to_string(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Errors from an upstream lookup.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Yahoo chart request failed: {0}")]
    Yahoo(#[from] closeprice_api::Error),
    #[error("Tiingo request failed: {0}")]
    Tiingo(#[from] TiingoError),
    #[error("{0}")]
    Other(String),
}

/// Looks up daily price history for a symbol over `[start, end)`.
///
/// An unknown symbol or an empty window should come back as an empty
/// history. Errors are reserved for failures to produce an answer at all.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    async fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RawPriceHistory, SourceError>;
}

/// Drops rows whose close is not a finite number.
pub(crate) fn finite_close(close: Option<f64>) -> Option<f64> {
    close.filter(|c| c.is_finite())
}
