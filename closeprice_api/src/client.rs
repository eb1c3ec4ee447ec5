//! HTTP client for the Yahoo Finance chart API.

use std::time::Duration;

use chrono::NaiveDate;
use url::Url;

use crate::{
    query::ChartQuery,
    types::{ChartResponse, DailyBar},
    user_agent::get_user_agent,
    Error,
};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the chart endpoint.
///
/// Each request is sent with a randomized browser user agent. The inner
/// `reqwest::Client` is built once and reused across requests.
pub struct Client {
    /// Base URL for the API. Defaults to `https://query1.finance.yahoo.com`.
    base_api_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client pointing at the production chart API.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::with_base_url_and_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_base_url_and_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Builds the chart URL. The symbol is pushed as a single percent-encoded
    /// path segment, so `/`, `?` and `#` in it never leave that segment.
    fn get_url(&self, query: &ChartQuery) -> Result<Url, Error> {
        let raw = format!("{}/v8/finance/chart", &self.base_api_url);
        let mut url = Url::parse(&raw).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!("Base URL cannot carry a path: {}", raw);
                Error::RequestFailed
            })?
            .push(&query.symbol);
        Ok(query.add_to_url(&url))
    }

    /// Fetches the raw chart response for a query.
    ///
    /// HTTP 404 maps to [`Error::SymbolNotFound`]; any other non-success
    /// status maps to [`Error::HttpStatus`]. A 200 body carrying an `error`
    /// object maps to [`Error::Upstream`].
    pub async fn get_chart(&self, query: &ChartQuery) -> Result<ChartResponse, Error> {
        let url = self.get_url(query)?;
        let resp = self
            .http
            .get(url)
            .header("user-agent", get_user_agent())
            .header("accept", "application/json, text/plain, */*")
            .header("accept-language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get chart for {}: {}", query.symbol, e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::SymbolNotFound(query.symbol.clone()));
        }

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<ChartResponse>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse chart: {} | body: {}", e, snippet);
            Error::ParseFailed(e.to_string())
        })?;

        if let Some(err) = parsed.chart.error.clone() {
            return Err(Error::Upstream {
                code: err.code,
                description: err.description,
            });
        }

        Ok(parsed)
    }

    /// Fetches daily bars for `symbol` over `[start, end)`, in upstream order.
    ///
    /// An empty vector means the symbol exists but had no trading days in the window.
    pub async fn get_daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, Error> {
        let query = ChartQuery::new(symbol, start, end);
        let response = self.get_chart(&query).await?;
        Ok(response
            .first_result()
            .map(|result| result.bars())
            .unwrap_or_default())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_body_unchanged() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_long_body() {
        let body = "x".repeat(2500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
        assert_eq!(out.len(), 2000 + "...[truncated]".len());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = Client::with_base_url("http://localhost:1234/").unwrap();
        let query = ChartQuery::new(
            "ABC",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        );
        let url = client.get_url(&query).unwrap();
        assert!(url.as_str().starts_with("http://localhost:1234/v8/finance/chart/ABC?"));
    }

    #[test]
    fn symbol_is_a_single_encoded_segment() {
        let client = Client::with_base_url("http://localhost:1234").unwrap();
        let query = ChartQuery::new(
            "A/B?interval=1m#x",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        );
        let url = client.get_url(&query).unwrap();
        assert_eq!(url.path(), "/v8/finance/chart/A%2FB%3Finterval=1m%23x");
        assert_eq!(url.fragment(), None);

        let intervals: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "interval")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(intervals, vec!["1d".to_string()]);
    }
}
