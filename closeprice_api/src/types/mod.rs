//! Response types for the chart endpoint.

mod bar;
mod chart;

pub use bar::DailyBar;
pub use chart::{
    AdjCloseIndicator, Chart, ChartError, ChartMeta, ChartResponse, ChartResult, Indicators,
    QuoteIndicator,
};
