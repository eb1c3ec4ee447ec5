//! Query builder for the chart endpoint.

use chrono::{NaiveDate, NaiveTime};
use url::Url;

/// Bar size requested from the chart endpoint. Only daily bars are served.
const DAILY_INTERVAL: &str = "1d";

/// A chart request for one symbol over `[start, end)`.
///
/// Dates are converted to UTC midnight unix timestamps, which is what the
/// endpoint expects in `period1`/`period2`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartQuery {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ChartQuery {
    pub fn new(symbol: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.to_string(),
            start,
            end,
        }
    }

    /// Unix seconds of `start` at UTC midnight.
    pub fn period1(&self) -> i64 {
        midnight_utc(self.start)
    }

    /// Unix seconds of `end` at UTC midnight. The bar for `end` itself is excluded.
    pub fn period2(&self) -> i64 {
        midnight_utc(self.end)
    }

    /// Appends this query's parameters to the given URL, returning the modified URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("period1", &self.period1().to_string())
            .append_pair("period2", &self.period2().to_string())
            .append_pair("interval", DAILY_INTERVAL)
            .append_pair("includeAdjustedClose", "true")
            .append_pair("events", "div,split");
        url
    }
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}
