//! Tiingo API client for fetching historical end-of-day prices.

use super::error::TiingoError;
use super::types::TiingoDailyPrice;
use chrono::NaiveDate;
use reqwest::Url;
use std::time::Duration;

/// Request timeout for Tiingo API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tiingo REST API client for end-of-day historical prices.
pub struct TiingoClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TiingoClient {
    /// Create a new TiingoClient with default base URL.
    pub fn new(api_key: String) -> Result<Self, TiingoError> {
        Self::with_base_url("https://api.tiingo.com", api_key)
    }

    /// Create a new TiingoClient with custom base URL (for testing with wiremock).
    pub fn with_base_url(base_url: &str, api_key: String) -> Result<Self, TiingoError> {
        Self::with_base_url_and_timeout(base_url, api_key, REQUEST_TIMEOUT)
    }

    pub fn with_base_url_and_timeout(
        base_url: &str,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, TiingoError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `{base}/tiingo/daily/{ticker}/prices` with the ticker percent-encoded
    /// as one path segment.
    fn prices_url(&self, ticker: &str) -> Result<Url, TiingoError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| TiingoError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| TiingoError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["tiingo", "daily", ticker, "prices"]);
        Ok(url)
    }

    /// Get daily prices for a ticker between two dates, both inclusive.
    ///
    /// Returns `Ok(vec![])` if the ticker is unknown (404) or no data exists in the range.
    /// Returns `Err(TiingoError::RateLimited)` if Tiingo returns a rate limit response.
    ///
    /// Tiingo quirk: rate limits return HTTP 200 with Content-Type text/plain
    /// instead of a proper 429 status code.
    pub async fn get_daily_prices(
        &self,
        ticker: &str,
        start: NaiveDate,
        end_inclusive: NaiveDate,
    ) -> Result<Vec<TiingoDailyPrice>, TiingoError> {
        let start_str = start.format("%Y-%m-%d").to_string();
        let end_str = end_inclusive.format("%Y-%m-%d").to_string();
        let url = self.prices_url(ticker)?;

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Token {}", self.api_key))
            .query(&[("startDate", &start_str), ("endDate", &end_str)])
            .send()
            .await?;

        let status = response.status();

        // 404 = ticker not found on Tiingo
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TiingoError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TiingoError::RateLimited);
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(TiingoError::ParseFailed(format!(
                "HTTP {}: {}",
                status,
                snippet(&body, 200)
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        let body = response.text().await.map_err(|e| {
            TiingoError::ParseFailed(format!("Failed to read response body: {}", e))
        })?;

        // If content type is text/plain, it is likely a rate limit message
        if content_type.contains("text/plain") || content_type.contains("text/html") {
            let lower = body.to_lowercase();
            if lower.contains("rate limit")
                || lower.contains("too many requests")
                || lower.contains("error")
            {
                return Err(TiingoError::RateLimited);
            }
        }

        serde_json::from_str(&body).map_err(|e| {
            TiingoError::ParseFailed(format!(
                "Failed to deserialize response: {} | body: {}",
                e,
                snippet(&body, 500)
            ))
        })
    }
}

fn snippet(body: &str, max: usize) -> &str {
    if body.len() <= max {
        return body;
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
