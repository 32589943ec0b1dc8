//! lightning-ohlc: OHLC candles from exchange trade executions
//!
//! This library provides:
//! - Candle building from time-ordered execution logs (the `ohlc` module)
//! - Public REST market data and paginated execution history
//! - Realtime executions over the JSON-RPC WebSocket API
//! - Reconnecting WebSocket transport
//! - Configuration, logging and metrics

pub mod api;
pub mod cli;
pub mod config;
pub mod ohlc;
pub mod realtime;
pub mod telemetry;
pub mod ws;
