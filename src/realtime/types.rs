//! JSON-RPC 2.0 message types for the realtime API

use serde::{Deserialize, Serialize};

/// Channel prefix for trade executions
pub const EXECUTIONS_CHANNEL_PREFIX: &str = "lightning_executions_";

/// Executions channel name for a product
pub fn executions_channel(product_code: &str) -> String {
    format!("{}{}", EXECUTIONS_CHANNEL_PREFIX, product_code)
}

/// Client `subscribe` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: ChannelParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

impl RpcRequest {
    /// Subscribe to a channel
    pub fn subscribe(channel: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "subscribe",
            params: ChannelParams {
                channel: channel.into(),
            },
            id: None,
        }
    }

    /// Attach a request id so the server acknowledges it
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Params naming a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelParams {
    pub channel: String,
}

/// Any incoming frame, decoded just far enough to route it
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Option<ChannelParams>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Option<bool>,
}

/// `channelMessage` notification with a typed payload
#[derive(Debug, Deserialize)]
pub struct ChannelMessage<T> {
    pub params: ChannelPayload<T>,
}

/// Channel name plus payload
#[derive(Debug, Deserialize)]
pub struct ChannelPayload<T> {
    pub channel: String,
    pub message: T,
}
