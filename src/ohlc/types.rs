//! Execution and candle types

use super::CandleError;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;

/// Taker side of an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order was the taker
    Buy,
    /// Sell order was the taker
    Sell,
    /// Matched during itayose (no taker), sent as an empty string
    #[default]
    #[serde(rename = "")]
    Unknown,
}

/// Execution record as it appears on the wire
///
/// Shared by the `getexecutions` REST endpoint and the
/// `lightning_executions_*` realtime channel. The timestamp is kept as text
/// so that a bad value surfaces as [`CandleError::TimestampParse`] instead of
/// failing the whole payload decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExecution {
    pub id: i64,
    #[serde(default)]
    pub side: Side,
    pub price: Decimal,
    pub size: Decimal,
    pub exec_date: String,
    #[serde(default)]
    pub buy_child_order_acceptance_id: String,
    #[serde(default)]
    pub sell_child_order_acceptance_id: String,
}

/// A single trade execution
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// Exchange-assigned, monotonically increasing trade id
    pub id: i64,
    /// Taker side
    pub side: Side,
    /// Exchange timestamp of the trade
    pub time: DateTime<Utc>,
    /// Trade price
    pub price: Decimal,
    /// Trade quantity
    pub size: Decimal,
    /// Receipt time minus `time`; may be negative under clock skew
    pub delay: chrono::Duration,
    pub buy_child_order_acceptance_id: String,
    pub sell_child_order_acceptance_id: String,
}

impl Execution {
    /// Create an execution with zero delay
    pub fn new(id: i64, time: DateTime<Utc>, price: Decimal, size: Decimal) -> Self {
        Self {
            id,
            side: Side::Unknown,
            time,
            price,
            size,
            delay: chrono::Duration::zero(),
            buy_child_order_acceptance_id: String::new(),
            sell_child_order_acceptance_id: String::new(),
        }
    }

    /// Set the delay from the local receipt time
    pub fn received_at(mut self, received: DateTime<Utc>) -> Self {
        self.delay = received - self.time;
        self
    }

    /// Set the taker side
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Convert a wire record
    ///
    /// `received` is the local receipt time of the message carrying the
    /// record. Historical data has no meaningful receipt time; pass `None`
    /// and the delay is zero.
    pub fn from_raw(
        raw: &RawExecution,
        received: Option<DateTime<Utc>>,
    ) -> Result<Self, CandleError> {
        let time = parse_exec_date(&raw.exec_date).ok_or_else(|| CandleError::TimestampParse {
            id: raw.id,
            value: raw.exec_date.clone(),
        })?;

        let delay = received
            .map(|r| r - time)
            .unwrap_or_else(chrono::Duration::zero);

        Ok(Self {
            id: raw.id,
            side: raw.side,
            time,
            price: raw.price,
            size: raw.size,
            delay,
            buy_child_order_acceptance_id: raw.buy_child_order_acceptance_id.clone(),
            sell_child_order_acceptance_id: raw.sell_child_order_acceptance_id.clone(),
        })
    }
}

/// Parse an exchange timestamp
///
/// The realtime API sends RFC 3339 with a `Z` suffix and up to 7 fractional
/// digits; the REST API omits the offset. Offset-less values are UTC.
pub fn parse_exec_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// OHLC candle for one time bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    /// Bucket start, second-aligned
    pub time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Sum of execution sizes
    pub volume: Decimal,
    /// Mean execution delay, truncated to milliseconds, never negative
    #[serde(rename = "delay_ms", serialize_with = "serialize_millis")]
    pub delay: Duration,
}

fn serialize_millis<S: Serializer>(delay: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
}
