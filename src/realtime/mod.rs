//! Realtime execution stream
//!
//! Pushes batches of executions as they are announced on the exchange's
//! JSON-RPC channels. Batches are unbounded in time; callers buffer them
//! into finite windows before building candles.

mod lightning;
mod types;

pub use lightning::{LightningFeed, REALTIME_URL};
pub use types::{
    executions_channel, ChannelMessage, ChannelParams, ChannelPayload, RpcRequest,
    EXECUTIONS_CHANNEL_PREFIX,
};

use crate::ohlc::{CandleError, Execution};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Trait for execution feed implementations
#[async_trait]
pub trait ExecutionFeed: Send + Sync {
    /// Subscribe to execution batches
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<Vec<Execution>>>;
}

/// Errors decoding realtime frames
#[derive(Debug, Error)]
pub enum FeedError {
    /// Frame did not match the expected schema
    #[error("Failed to decode message: {0}")]
    Decode(#[from] serde_json::Error),
    /// Execution with an unparseable timestamp
    #[error(transparent)]
    Execution(#[from] CandleError),
}
