//! Core of the closing-price service: request validation, symbol resolution
//! with market-suffix fallback, series normalization and response building.
//!
//! Upstream data comes through the [`PriceSource`] trait. Two adapters ship:
//! [`yahoo::YahooSource`] over the `closeprice_api` chart client and
//! [`tiingo::TiingoSource`] over the Tiingo end-of-day API.

pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod resolver;
pub mod response;
pub mod source;
pub mod tiingo;
pub mod validation;
pub mod yahoo;

pub use closeprice_api;

pub use config::{ConfigError, Provider, ServiceConfig};
pub use error::{ErrorKind, PriceHistoryError};
pub use pipeline::PriceHistoryService;
pub use resolver::{LookupOutcome, Resolution, SymbolResolver};
pub use response::{ApiResponse, ApiResult, PricePoint, ResponseBody};
pub use source::{PriceSource, RawPriceHistory, RawRow, SourceError};
pub use validation::{StockQuery, StockRequest};
