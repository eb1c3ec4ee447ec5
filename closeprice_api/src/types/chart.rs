use serde::{Deserialize, Serialize};

use super::bar::DailyBar;

/// Top-level envelope of a chart response.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

/// Error object returned in place of a result (e.g. unknown symbol).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChartResult {
    pub meta: ChartMeta,
    /// Absent when the window contains no trading days.
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub exchange_name: Option<String>,
    #[serde(default)]
    pub exchange_timezone_name: Option<String>,
    /// Offset of the exchange's local time from UTC, in seconds.
    #[serde(default)]
    pub gmtoffset: i64,
    #[serde(default)]
    pub data_granularity: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
    #[serde(default)]
    pub adjclose: Option<Vec<AdjCloseIndicator>>,
}

/// Column-oriented OHLCV arrays, index-aligned with `ChartResult::timestamp`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct QuoteIndicator {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AdjCloseIndicator {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

impl ChartResponse {
    /// The first result, if the response carried one.
    pub fn first_result(&self) -> Option<&ChartResult> {
        self.chart.result.as_ref().and_then(|r| r.first())
    }
}

impl ChartResult {
    /// Zips the column arrays into rows, in upstream order.
    ///
    /// Rows past the end of a shorter column get `None` for that column.
    pub fn bars(&self) -> Vec<DailyBar> {
        let Some(timestamps) = self.timestamp.as_ref() else {
            return Vec::new();
        };
        let quote = self.indicators.quote.first();
        let adjclose = self
            .indicators
            .adjclose
            .as_ref()
            .and_then(|a| a.first())
            .map(|a| a.adjclose.as_slice())
            .unwrap_or(&[]);

        timestamps
            .iter()
            .enumerate()
            .map(|(i, &timestamp)| {
                let column = |values: Option<&Vec<Option<f64>>>| {
                    values.and_then(|v| v.get(i).copied().flatten())
                };
                DailyBar {
                    timestamp,
                    gmtoffset: self.meta.gmtoffset,
                    open: column(quote.map(|q| &q.open)),
                    high: column(quote.map(|q| &q.high)),
                    low: column(quote.map(|q| &q.low)),
                    close: column(quote.map(|q| &q.close)),
                    adj_close: adjclose.get(i).copied().flatten(),
                    volume: quote.and_then(|q| q.volume.get(i).copied().flatten()),
                }
            })
            .collect()
    }
}
