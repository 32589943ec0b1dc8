//! WebSocket types and configuration

use std::time::Duration;
use thiserror::Error;

/// Shortest ping period; a zero interval would spin
const MIN_PING_INTERVAL: Duration = Duration::from_secs(1);

/// WebSocket client configuration
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// WebSocket URL to connect to
    pub url: String,
    /// Maximum reconnection attempts before giving up (0 = infinite)
    pub max_reconnect_attempts: u32,
    /// Initial delay before first reconnection attempt
    pub initial_reconnect_delay: Duration,
    /// Maximum delay between reconnection attempts
    pub max_reconnect_delay: Duration,
    /// Interval for sending ping frames
    pub ping_interval: Duration,
    /// Text frames sent after every successful (re)connect
    pub subscriptions: Vec<String>,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_reconnect_attempts: 10,
            initial_reconnect_delay: Duration::from_secs(1),
            max_reconnect_delay: Duration::from_secs(60),
            ping_interval: Duration::from_secs(30),
            subscriptions: Vec::new(),
        }
    }
}

impl WsConfig {
    /// Create a new config with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set maximum reconnection attempts
    pub fn max_reconnects(mut self, n: u32) -> Self {
        self.max_reconnect_attempts = n;
        self
    }

    /// Set initial reconnection delay
    pub fn initial_delay(mut self, d: Duration) -> Self {
        self.initial_reconnect_delay = d;
        self
    }

    /// Set maximum reconnection delay
    pub fn max_delay(mut self, d: Duration) -> Self {
        self.max_reconnect_delay = d;
        self
    }

    /// Set ping interval
    pub fn ping_interval(mut self, d: Duration) -> Self {
        self.ping_interval = d;
        self
    }

    /// Add a message to send on every connect
    pub fn subscribe(mut self, message: impl Into<String>) -> Self {
        self.subscriptions.push(message.into());
        self
    }

    /// Ping period actually used, at least one second
    pub(crate) fn ping_period(&self) -> Duration {
        self.ping_interval.max(MIN_PING_INTERVAL)
    }

    /// Backoff before the next attempt, doubling up to the maximum
    pub(crate) fn next_delay(&self, current: Duration) -> Duration {
        (current * 2).min(self.max_reconnect_delay)
    }
}

/// WebSocket message types
#[derive(Debug, Clone)]
pub enum WsMessage {
    /// Text message
    Text(String),
    /// Connection established and subscriptions sent
    Connected,
    /// Connection closed for good
    Disconnected,
    /// Reconnecting after failure
    Reconnecting { attempt: u32 },
}

/// WebSocket errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WsError {
    /// Connection failed or dropped
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// Maximum reconnection attempts exceeded
    #[error("Maximum reconnection attempts exceeded")]
    MaxReconnectsExceeded,
    /// Send failed
    #[error("Send failed: {0}")]
    SendFailed(String),
}
