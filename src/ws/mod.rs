//! WebSocket transport
//!
//! Reconnecting client with exponential backoff, ping keepalive, and
//! subscription messages replayed after every connect.

mod client;
mod types;

pub use client::WsClient;
pub use types::{WsConfig, WsError, WsMessage};
