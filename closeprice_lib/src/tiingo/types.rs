//! Response types for Tiingo API.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

/// A single daily price record from the Tiingo end-of-day API.
///
/// The response is a JSON array of these records, oldest first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TiingoDailyPrice {
    pub date: String,
    pub close: f64,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(default)]
    pub adj_close: Option<f64>,
    #[serde(default)]
    pub div_cash: Option<f64>,
    #[serde(default)]
    pub split_factor: Option<f64>,
}

impl TiingoDailyPrice {
    /// Parses `date` (RFC 3339, e.g. `2024-06-15T00:00:00+00:00`) as a
    /// wall-clock time in its own offset.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|dt| dt.naive_local())
    }
}
