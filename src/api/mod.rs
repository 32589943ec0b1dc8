//! Public REST API
//!
//! Market data endpoints and execution history used to feed the candle
//! builder.

mod client;
mod types;

pub use client::{RestClient, RestConfig, API_BASE_URL};
pub use types::{
    Board, BoardState, ExecutionQuery, Health, HealthStatus, Market, MarketState, PriceLevel,
    Ticker,
};

use crate::ohlc::CandleError;
use thiserror::Error;

/// REST API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or timeout
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx response
    #[error("Exchange error (HTTP {status}): {message}")]
    Exchange {
        status: u16,
        /// Exchange-specific error code from the response body
        code: Option<i64>,
        message: String,
    },
    /// Response body did not match the expected schema
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Execution record with an unparseable timestamp
    #[error(transparent)]
    Execution(#[from] CandleError),
}
