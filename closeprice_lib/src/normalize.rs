//! Turns a raw price table into the `(Date, Close)` series clients receive.

use chrono::NaiveDateTime;

use crate::response::PricePoint;
use crate::source::RawPriceHistory;
use crate::validation::DATE_FORMAT;

/// Rounds to two decimals, halves away from zero.
///
/// The value is scaled by 100 before rounding, so the binary representation
/// of the scaled value decides ties: `123.455` scales to exactly `12345.5`
/// and rounds to `123.46`.
pub fn round_close(close: f64) -> f64 {
    (close * 100.0).round() / 100.0
}

/// Calendar date of a row index, without time or zone.
pub fn format_date(date: NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Keeps only date and close, in upstream order.
pub fn normalize_series(history: &RawPriceHistory) -> Vec<PricePoint> {
    history
        .rows
        .iter()
        .map(|row| PricePoint {
            date: format_date(row.date),
            close: round_close(row.close),
        })
        .collect()
}
