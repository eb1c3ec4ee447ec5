//! Typed client for the Yahoo Finance v8 chart endpoint.
//!
//! Only daily bars over an explicit date window are supported.

mod client;
mod errors;
mod query;
pub mod types;
mod user_agent;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::query::ChartQuery;
