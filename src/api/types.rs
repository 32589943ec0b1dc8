//! REST API response types

use crate::ohlc::parse_exec_date;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Tradable product listed by `/getmarkets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    /// Product code (e.g., "BTC_JPY")
    pub product_code: String,
    /// Market type (e.g., "Spot", "FX", "Futures")
    #[serde(default)]
    pub market_type: Option<String>,
    /// Alias for futures contracts (e.g., "BTCJPY_MAT3M")
    #[serde(default)]
    pub alias: Option<String>,
}

/// Best bid/ask snapshot from `/getticker`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker {
    pub product_code: String,
    #[serde(default)]
    pub state: Option<MarketState>,
    #[serde(deserialize_with = "deserialize_exec_date")]
    pub timestamp: DateTime<Utc>,
    pub tick_id: i64,
    pub best_bid: Decimal,
    pub best_ask: Decimal,
    pub best_bid_size: Decimal,
    pub best_ask_size: Decimal,
    pub total_bid_depth: Decimal,
    pub total_ask_depth: Decimal,
    /// Last traded price
    pub ltp: Decimal,
    pub volume: Decimal,
    pub volume_by_product: Decimal,
}

impl Ticker {
    /// Best ask minus best bid
    pub fn spread(&self) -> Decimal {
        self.best_ask - self.best_bid
    }
}

/// One price level of the order book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub size: Decimal,
}

/// Order book from `/getboard`
///
/// Bids are sorted best (highest) first and asks best (lowest) first, as
/// delivered by the exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub mid_price: Decimal,
    #[serde(default)]
    pub bids: Vec<PriceLevel>,
    #[serde(default)]
    pub asks: Vec<PriceLevel>,
}

impl Board {
    /// Highest bid
    pub fn best_bid(&self) -> Option<PriceLevel> {
        self.bids.iter().copied().max_by_key(|l| l.price)
    }

    /// Lowest ask
    pub fn best_ask(&self) -> Option<PriceLevel> {
        self.asks.iter().copied().min_by_key(|l| l.price)
    }

    /// Total resting bid size
    pub fn total_bid_size(&self) -> Decimal {
        self.bids.iter().map(|l| l.size).sum()
    }

    /// Total resting ask size
    pub fn total_ask_size(&self) -> Decimal {
        self.asks.iter().map(|l| l.size).sum()
    }
}

/// Exchange load level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Normal,
    Busy,
    VeryBusy,
    SuperBusy,
    NoOrder,
    Stop,
}

/// Response of `/gethealth`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: HealthStatus,
}

/// Trading state of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketState {
    #[serde(rename = "RUNNING")]
    Running,
    #[serde(rename = "CLOSED")]
    Closed,
    #[serde(rename = "STARTING")]
    Starting,
    #[serde(rename = "PREOPEN")]
    Preopen,
    #[serde(rename = "CIRCUIT BREAK")]
    CircuitBreak,
    #[serde(rename = "AWAITING SQ")]
    AwaitingSq,
    #[serde(rename = "MATURED")]
    Matured,
}

/// Response of `/getboardstate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardState {
    pub health: HealthStatus,
    pub state: MarketState,
    /// Extra data, e.g. the special quotation price of a matured contract
    #[serde(default)]
    pub data: Option<HashMap<String, serde_json::Value>>,
}

/// Error payload returned with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub status: i64,
    #[serde(default)]
    pub error_message: String,
}

/// Query parameters for `/getexecutions`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionQuery {
    pub product_code: String,
    /// Number of results (exchange default 100)
    pub count: Option<u32>,
    /// Only executions with an id lower than this
    pub before: Option<i64>,
    /// Only executions with an id higher than this
    pub after: Option<i64>,
}

impl ExecutionQuery {
    /// Query the most recent executions of a product
    pub fn new(product_code: impl Into<String>) -> Self {
        Self {
            product_code: product_code.into(),
            count: None,
            before: None,
            after: None,
        }
    }

    /// Set the page size
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Only ids lower than `id`
    pub fn before(mut self, id: i64) -> Self {
        self.before = Some(id);
        self
    }

    /// Only ids higher than `id`
    pub fn after(mut self, id: i64) -> Self {
        self.after = Some(id);
        self
    }

    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("product_code", self.product_code.clone())];
        if let Some(count) = self.count {
            query.push(("count", count.to_string()));
        }
        if let Some(before) = self.before {
            query.push(("before", before.to_string()));
        }
        if let Some(after) = self.after {
            query.push(("after", after.to_string()));
        }
        query
    }
}

fn deserialize_exec_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_exec_date(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", value)))
}
