//! Tiingo end-of-day API as an alternative upstream provider.
//!
//! Selected with `provider: tiingo`. Requires `TIINGO_API_KEY`.

pub mod client;
pub mod error;
pub mod source;
pub mod types;

pub use client::TiingoClient;
pub use error::TiingoError;
pub use source::TiingoSource;
