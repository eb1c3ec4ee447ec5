use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One row of a chart response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyBar {
    /// Bar open time, unix seconds (UTC).
    pub timestamp: i64,
    /// Exchange offset from UTC in seconds, copied from the response meta.
    pub gmtoffset: i64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub adj_close: Option<f64>,
    pub volume: Option<u64>,
}

impl DailyBar {
    /// Bar open time in the exchange's local wall-clock time.
    pub fn local_time(&self) -> Option<NaiveDateTime> {
        self.timestamp
            .checked_add(self.gmtoffset)
            .and_then(|t| DateTime::from_timestamp(t, 0))
            .map(|dt| dt.naive_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(timestamp: i64, gmtoffset: i64) -> DailyBar {
        DailyBar {
            timestamp,
            gmtoffset,
            open: None,
            high: None,
            low: None,
            close: Some(1.0),
            adj_close: None,
            volume: None,
        }
    }

    #[test]
    fn local_time_applies_offset() {
        // 2024-03-01 04:30 UTC is 09:30 in Karachi (UTC+5).
        let b = bar(1709267400, 18000);
        let local = b.local_time().unwrap();
        assert_eq!(local.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(local.format("%H:%M").to_string(), "09:30");
    }

    #[test]
    fn negative_offset_keeps_trading_date() {
        // 2024-03-01 14:30 UTC is 09:30 in New York (UTC-5).
        let b = bar(1709303400, -18000);
        let local = b.local_time().unwrap();
        assert_eq!(local.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn out_of_range_timestamp_is_none() {
        assert_eq!(bar(i64::MAX, 18000).local_time(), None);
        assert_eq!(bar(i64::MIN, -18000).local_time(), None);
    }
}
