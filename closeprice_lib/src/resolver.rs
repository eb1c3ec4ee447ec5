//! Symbol resolution with market-suffix fallback.
//!
//! A ticker is tried first with each configured market suffix appended and
//! then bare. The first candidate that returns at least one row wins. Failed
//! or timed-out lookups count as "no data" so the next candidate still runs.

use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::PriceHistoryError;
use crate::source::{PriceSource, RawPriceHistory};
use crate::validation::StockQuery;

/// Market suffix of the Pakistan Stock Exchange (Karachi) on Yahoo Finance.
pub const DEFAULT_MARKET_SUFFIX: &str = ".KA";

/// Per-call upstream timeout used when none is configured.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a single upstream lookup.
#[derive(Debug)]
pub enum LookupOutcome {
    /// The upstream returned at least one row.
    Rows(RawPriceHistory),
    /// The upstream answered with no rows.
    Empty,
    /// The lookup errored or timed out. Carries an `UpstreamUnavailable` error.
    Failed(PriceHistoryError),
}

/// The candidate that produced data, plus every symbol tried to get there.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub symbol: String,
    pub history: RawPriceHistory,
    pub attempted: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SymbolResolver {
    suffixes: Vec<String>,
    timeout: Duration,
}

impl Default for SymbolResolver {
    fn default() -> Self {
        Self::new(vec![DEFAULT_MARKET_SUFFIX.to_string()], DEFAULT_UPSTREAM_TIMEOUT)
    }
}

impl SymbolResolver {
    pub fn new(suffixes: Vec<String>, timeout: Duration) -> Self {
        Self { suffixes, timeout }
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Candidate symbols in lookup order: one per suffix, then the bare ticker.
    /// Duplicates are dropped, keeping the first position.
    pub fn candidates(&self, ticker: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::with_capacity(self.suffixes.len() + 1);
        let suffixed = self.suffixes.iter().map(|s| format!("{}{}", ticker, s));
        for symbol in suffixed.chain(std::iter::once(ticker.to_string())) {
            if !candidates.contains(&symbol) {
                candidates.push(symbol);
            }
        }
        candidates
    }

    /// Tries each candidate in order and returns the first non-empty history.
    pub async fn resolve(
        &self,
        source: &dyn PriceSource,
        query: &StockQuery,
    ) -> Result<Resolution, PriceHistoryError> {
        let mut attempted = Vec::new();

        for symbol in self.candidates(&query.ticker) {
            attempted.push(symbol.clone());
            match lookup(source, &symbol, query.start_date, query.end_date, self.timeout).await {
                LookupOutcome::Rows(history) => {
                    info!(
                        ticker = %query.ticker,
                        symbol = %symbol,
                        rows = history.len(),
                        "Resolved price history"
                    );
                    return Ok(Resolution {
                        symbol,
                        history,
                        attempted,
                    });
                }
                LookupOutcome::Empty => {
                    debug!(symbol = %symbol, "No rows returned, trying next candidate");
                }
                LookupOutcome::Failed(err) => {
                    warn!(symbol = %symbol, "{}; trying next candidate", err);
                }
            }
        }

        Err(PriceHistoryError::NoDataFound { attempted })
    }
}

/// Calls the upstream once, bounded by `timeout`, and classifies the result.
pub async fn lookup(
    source: &dyn PriceSource,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    timeout: Duration,
) -> LookupOutcome {
    debug!(provider = source.name(), symbol, %start, %end, "Fetching price history");

    match tokio::time::timeout(timeout, source.fetch_history(symbol, start, end)).await {
        Ok(Ok(history)) if history.is_empty() => LookupOutcome::Empty,
        Ok(Ok(history)) => LookupOutcome::Rows(history),
        Ok(Err(e)) => LookupOutcome::Failed(PriceHistoryError::UpstreamUnavailable {
            symbol: symbol.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => LookupOutcome::Failed(PriceHistoryError::UpstreamUnavailable {
            symbol: symbol.to_string(),
            reason: format!("timed out after {:?}", timeout),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RawRow, SourceError};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    enum Reply {
        Rows(usize),
        Empty,
        Fail,
        Hang,
    }

    struct ScriptedSource {
        replies: HashMap<String, Reply>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn new(replies: Vec<(&str, Reply)>) -> Self {
            Self {
                replies: replies
                    .into_iter()
                    .map(|(s, r)| (s.to_string(), r))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PriceSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch_history(
            &self,
            symbol: &str,
            start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<RawPriceHistory, SourceError> {
            self.calls.lock().unwrap().push(symbol.to_string());
            match self.replies.get(symbol) {
                Some(Reply::Rows(n)) => {
                    let rows = (0..*n)
                        .map(|i| {
                            let date = start + chrono::Duration::days(i as i64);
                            RawRow::close_only(date.and_hms_opt(0, 0, 0).unwrap(), 100.0 + i as f64)
                        })
                        .collect();
                    Ok(RawPriceHistory::new(symbol, rows))
                }
                Some(Reply::Fail) => Err(SourceError::Other("connection reset".to_string())),
                Some(Reply::Hang) => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(RawPriceHistory::new(symbol, vec![]))
                }
                Some(Reply::Empty) | None => Ok(RawPriceHistory::new(symbol, vec![])),
            }
        }
    }

    fn query(ticker: &str) -> StockQuery {
        StockQuery {
            ticker: ticker.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        }
    }

    #[test]
    fn default_candidates() {
        let resolver = SymbolResolver::default();
        assert_eq!(resolver.candidates("OGDC"), vec!["OGDC.KA", "OGDC"]);
    }

    #[test]
    fn multiple_suffixes_keep_order() {
        let resolver = SymbolResolver::new(
            vec![".KA".to_string(), ".L".to_string()],
            DEFAULT_UPSTREAM_TIMEOUT,
        );
        assert_eq!(resolver.candidates("ABC"), vec!["ABC.KA", "ABC.L", "ABC"]);
    }

    #[test]
    fn duplicate_candidates_dropped() {
        let resolver = SymbolResolver::new(
            vec![".KA".to_string(), ".KA".to_string()],
            DEFAULT_UPSTREAM_TIMEOUT,
        );
        assert_eq!(resolver.candidates("ABC"), vec!["ABC.KA", "ABC"]);
    }

    #[test]
    fn no_suffixes_means_bare_only() {
        let resolver = SymbolResolver::new(vec![], DEFAULT_UPSTREAM_TIMEOUT);
        assert_eq!(resolver.candidates("ABC"), vec!["ABC"]);
    }

    #[tokio::test]
    async fn primary_hit_skips_secondary() {
        let source = ScriptedSource::new(vec![("ABC.KA", Reply::Rows(2)), ("ABC", Reply::Rows(5))]);
        let resolution = SymbolResolver::default()
            .resolve(&source, &query("ABC"))
            .await
            .unwrap();

        assert_eq!(resolution.symbol, "ABC.KA");
        assert_eq!(resolution.history.len(), 2);
        assert_eq!(resolution.attempted, vec!["ABC.KA"]);
        assert_eq!(source.calls(), vec!["ABC.KA"]);
    }

    #[tokio::test]
    async fn empty_primary_falls_back() {
        let source = ScriptedSource::new(vec![("ABC.KA", Reply::Empty), ("ABC", Reply::Rows(3))]);
        let resolution = SymbolResolver::default()
            .resolve(&source, &query("ABC"))
            .await
            .unwrap();

        assert_eq!(resolution.symbol, "ABC");
        assert_eq!(resolution.history.len(), 3);
        assert_eq!(resolution.attempted, vec!["ABC.KA", "ABC"]);
        assert_eq!(source.calls(), vec!["ABC.KA", "ABC"]);
    }

    #[tokio::test]
    async fn failing_primary_falls_back() {
        let source = ScriptedSource::new(vec![("ABC.KA", Reply::Fail), ("ABC", Reply::Rows(1))]);
        let resolution = SymbolResolver::default()
            .resolve(&source, &query("ABC"))
            .await
            .unwrap();

        assert_eq!(resolution.symbol, "ABC");
        assert_eq!(source.calls(), vec!["ABC.KA", "ABC"]);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_primary_times_out_and_falls_back() {
        let source = ScriptedSource::new(vec![("ABC.KA", Reply::Hang), ("ABC", Reply::Rows(1))]);
        let resolver = SymbolResolver::new(vec![".KA".to_string()], Duration::from_secs(5));
        let resolution = resolver.resolve(&source, &query("ABC")).await.unwrap();

        assert_eq!(resolution.symbol, "ABC");
        assert_eq!(resolution.attempted, vec!["ABC.KA", "ABC"]);
    }

    #[tokio::test]
    async fn exhausted_candidates_report_all_symbols() {
        let source = ScriptedSource::new(vec![("ZZZ.KA", Reply::Empty), ("ZZZ", Reply::Fail)]);
        let err = SymbolResolver::default()
            .resolve(&source, &query("ZZZ"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            PriceHistoryError::NoDataFound {
                attempted: vec!["ZZZ.KA".to_string(), "ZZZ".to_string()]
            }
        );
        assert!(err.to_string().contains("ZZZ.KA"));
        assert_eq!(source.calls(), vec!["ZZZ.KA", "ZZZ"]);
    }

    #[tokio::test]
    async fn lookup_classifies_outcomes() {
        let source = ScriptedSource::new(vec![
            ("ROWS", Reply::Rows(1)),
            ("EMPTY", Reply::Empty),
            ("FAIL", Reply::Fail),
        ]);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let timeout = Duration::from_secs(1);

        assert!(matches!(
            lookup(&source, "ROWS", start, end, timeout).await,
            LookupOutcome::Rows(h) if h.len() == 1
        ));
        assert!(matches!(
            lookup(&source, "EMPTY", start, end, timeout).await,
            LookupOutcome::Empty
        ));
        match lookup(&source, "FAIL", start, end, timeout).await {
            LookupOutcome::Failed(PriceHistoryError::UpstreamUnavailable { symbol, reason }) => {
                assert_eq!(symbol, "FAIL");
                assert!(reason.contains("connection reset"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
