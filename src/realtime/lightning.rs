//! Realtime executions feed over the JSON-RPC WebSocket API

use super::types::{executions_channel, ChannelMessage, Envelope, RpcRequest};
use super::{ExecutionFeed, FeedError};
use crate::config::RealtimeConfig;
use crate::ohlc::{Execution, RawExecution};
use crate::telemetry::{self, LatencyMetric};
use crate::ws::{WsClient, WsConfig, WsMessage};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::mpsc;

/// Realtime API endpoint
pub const REALTIME_URL: &str = "wss://ws.lightstream.bitflyer.com/json-rpc";

/// Request id of the subscribe call, echoed in the server's ack
const SUBSCRIBE_REQUEST_ID: u64 = 1;

/// Execution feed for one product
pub struct LightningFeed {
    product_code: String,
    ws_config: WsConfig,
}

impl LightningFeed {
    /// Create a feed against the production endpoint
    pub fn new(product_code: impl Into<String>) -> Self {
        Self::from_config(product_code, &RealtimeConfig::default())
    }

    /// Create a feed from configuration
    pub fn from_config(product_code: impl Into<String>, config: &RealtimeConfig) -> Self {
        let ws_config = WsConfig::new(config.url.clone())
            .max_reconnects(config.max_reconnects)
            .initial_delay(Duration::from_secs(1))
            .max_delay(Duration::from_secs(60))
            .ping_interval(Duration::from_secs(config.ping_interval_secs));

        Self {
            product_code: product_code.into(),
            ws_config,
        }
    }

    /// Product this feed subscribes to
    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    fn channel(&self) -> String {
        executions_channel(&self.product_code)
    }

    /// Subscribe request for this feed's channel
    fn subscribe_message(&self) -> Result<String, FeedError> {
        let request = RpcRequest::subscribe(self.channel()).with_id(SUBSCRIBE_REQUEST_ID);
        Ok(serde_json::to_string(&request)?)
    }

    /// Decode one text frame
    ///
    /// Returns `None` for frames that are not execution batches on
    /// `channel` (acks, other channels). Every execution in a batch shares
    /// the same receipt time.
    fn parse_message(
        text: &str,
        channel: &str,
        received: DateTime<Utc>,
    ) -> Result<Option<Vec<Execution>>, FeedError> {
        let envelope: Envelope = serde_json::from_str(text)?;

        if envelope.method.as_deref() != Some("channelMessage") {
            if let (Some(id), Some(result)) = (envelope.id, envelope.result) {
                tracing::debug!(id, result, "JSON-RPC response");
            }
            return Ok(None);
        }

        match envelope.params {
            Some(params) if params.channel == channel => {}
            _ => return Ok(None),
        }

        let message: ChannelMessage<Vec<RawExecution>> = serde_json::from_str(text)?;
        let executions = message
            .params
            .message
            .iter()
            .map(|raw| Execution::from_raw(raw, Some(received)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(executions))
    }

    /// Run the message processing loop
    async fn run_message_loop(
        product_code: String,
        mut ws_rx: mpsc::Receiver<WsMessage>,
        batch_tx: mpsc::Sender<Vec<Execution>>,
    ) {
        let channel = executions_channel(&product_code);

        while let Some(msg) = ws_rx.recv().await {
            match msg {
                WsMessage::Text(text) => {
                    let batch = match Self::parse_message(&text, &channel, Utc::now()) {
                        Ok(Some(batch)) => batch,
                        Ok(None) => continue,
                        Err(e) => {
                            tracing::warn!(error = %e, "Dropping unparseable message");
                            continue;
                        }
                    };

                    telemetry::record_executions(&product_code, batch.len());
                    for execution in &batch {
                        if let Ok(delay) = execution.delay.to_std() {
                            telemetry::record_latency(LatencyMetric::ExecutionReceive, delay);
                        }
                    }

                    if batch_tx.send(batch).await.is_err() {
                        tracing::debug!("Execution receiver dropped, stopping feed");
                        break;
                    }
                }
                WsMessage::Connected => {
                    tracing::info!(product = %product_code, "Execution feed connected");
                }
                WsMessage::Disconnected => {
                    tracing::warn!(product = %product_code, "Execution feed disconnected");
                    break;
                }
                WsMessage::Reconnecting { attempt } => {
                    tracing::warn!(attempt, "Execution feed reconnecting...");
                }
            }
        }
    }
}

#[async_trait]
impl ExecutionFeed for LightningFeed {
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<Vec<Execution>>> {
        let (batch_tx, batch_rx) = mpsc::channel(1024);

        tracing::info!(channel = %self.channel(), "Subscribing to executions");

        let config = self.ws_config.clone().subscribe(self.subscribe_message()?);
        let ws_rx = WsClient::new(config).connect();

        let product_code = self.product_code.clone();
        tokio::spawn(async move {
            Self::run_message_loop(product_code, ws_rx, batch_tx).await;
        });

        Ok(batch_rx)
    }
}
