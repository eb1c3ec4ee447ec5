//! [`PriceSource`] adapter over the Tiingo client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::client::TiingoClient;
use super::types::TiingoDailyPrice;
use crate::source::{finite_close, PriceSource, RawPriceHistory, RawRow, SourceError};

pub struct TiingoSource {
    client: TiingoClient,
}

impl TiingoSource {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self, SourceError> {
        Ok(Self {
            client: TiingoClient::with_base_url_and_timeout(base_url, api_key, timeout)?,
        })
    }
}

fn price_to_row(price: &TiingoDailyPrice) -> Option<RawRow> {
    Some(RawRow {
        date: price.timestamp()?,
        open: price.open,
        high: price.high,
        low: price.low,
        close: finite_close(Some(price.close))?,
        adj_close: price.adj_close,
        volume: price.volume,
    })
}

#[async_trait]
impl PriceSource for TiingoSource {
    fn name(&self) -> &str {
        "tiingo"
    }

    /// Tiingo's end date is inclusive, so the day before `end` is requested.
    async fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RawPriceHistory, SourceError> {
        let Some(last_day) = end.pred_opt().filter(|d| *d >= start) else {
            return Ok(RawPriceHistory::new(symbol, Vec::new()));
        };
        let prices = self.client.get_daily_prices(symbol, start, last_day).await?;
        let rows = prices.iter().filter_map(price_to_row).collect();
        Ok(RawPriceHistory::new(symbol, rows))
    }
}
