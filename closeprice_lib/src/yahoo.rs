//! Yahoo Finance adapter for [`PriceSource`].
//!
//! Wraps the `closeprice_api` chart client. Row dates are taken in the
//! exchange's local time so a Karachi session opening at 09:30 PKT lands on
//! its own trading day.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use closeprice_api::types::DailyBar;
use tracing::debug;

use crate::source::{finite_close, PriceSource, RawPriceHistory, RawRow, SourceError};

pub struct YahooSource {
    client: closeprice_api::Client,
}

impl YahooSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        Ok(Self {
            client: closeprice_api::Client::with_base_url_and_timeout(base_url, timeout)?,
        })
    }

    pub fn from_client(client: closeprice_api::Client) -> Self {
        Self { client }
    }
}

/// Converts a chart bar into a row. Bars without a usable close are dropped.
pub fn bar_to_row(bar: &DailyBar) -> Option<RawRow> {
    let close = finite_close(bar.close)?;
    let date = bar.local_time()?;
    Some(RawRow {
        date,
        open: bar.open,
        high: bar.high,
        low: bar.low,
        close,
        adj_close: bar.adj_close,
        volume: bar.volume,
    })
}

#[async_trait]
impl PriceSource for YahooSource {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RawPriceHistory, SourceError> {
        let bars = match self.client.get_daily_history(symbol, start, end).await {
            Ok(bars) => bars,
            Err(closeprice_api::Error::SymbolNotFound(_)) => {
                debug!(symbol, "Symbol not listed on Yahoo");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        let rows = bars.iter().filter_map(bar_to_row).collect();
        Ok(RawPriceHistory::new(symbol, rows))
    }
}
