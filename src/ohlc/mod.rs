//! Candle builder
//!
//! Converts a time-ordered execution log into fixed-interval OHLC candles.
//! Pure and synchronous: no I/O, no shared state, safe to call from any
//! number of threads as long as each call owns its input.

mod builder;
mod types;

pub use builder::{
    build_candles, build_candles_from_raw, closes, mean_delay, validate_interval,
};
pub use types::{parse_exec_date, Candle, Execution, RawExecution, Side};

use thiserror::Error;

/// Candle building errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandleError {
    /// Interval was zero or negative
    #[error("Invalid candle interval: {0}s")]
    InvalidInterval(i64),
    /// Execution timestamp could not be parsed
    #[error("Invalid timestamp on execution {id}: {value:?}")]
    TimestampParse { id: i64, value: String },
}
