//! Execution log to OHLC candle aggregation
//!
//! Buckets are half-open `[start, start + interval)` on whole-second
//! timestamps. Empty buckets are skipped, so consecutive candles can be more
//! than one interval apart.

use super::types::{Candle, Execution, RawExecution};
use super::CandleError;
use chrono::{DateTime, SubsecRound, Timelike, Utc};
use rust_decimal::Decimal;
use std::time::Duration;

/// Aggregate executions into candles of `interval_secs` seconds
///
/// `executions` must be sorted ascending by `time`. Unsorted input is not
/// detected and produces unspecified (but non-panicking) output.
pub fn build_candles(
    executions: &[Execution],
    interval_secs: i64,
) -> Result<Vec<Candle>, CandleError> {
    validate_interval(interval_secs)?;

    let Some((first, rest)) = executions.split_first() else {
        return Ok(Vec::new());
    };

    let mut candles = Vec::new();
    let mut bucket = Bucket::open(first_bucket_start(first.time, interval_secs), first);

    for execution in rest {
        let time = execution.time.trunc_subsecs(0);

        // the advance is at most `elapsed`, so it stays in timestamp range
        let elapsed = (time - bucket.start).num_seconds();
        if elapsed < interval_secs {
            bucket.push(execution);
            continue;
        }

        let start = bucket.start + chrono::Duration::seconds(elapsed - elapsed % interval_secs);

        candles.push(bucket.finish());
        bucket = Bucket::open(start, execution);
    }

    candles.push(bucket.finish());
    Ok(candles)
}

/// Aggregate wire records into candles
///
/// The interval is validated before any record is looked at. Every record is
/// converted with the same receipt time (see [`Execution::from_raw`]); the
/// first bad timestamp aborts the call.
pub fn build_candles_from_raw(
    records: &[RawExecution],
    received: Option<DateTime<Utc>>,
    interval_secs: i64,
) -> Result<Vec<Candle>, CandleError> {
    validate_interval(interval_secs)?;

    let executions = records
        .iter()
        .map(|raw| Execution::from_raw(raw, received))
        .collect::<Result<Vec<_>, _>>()?;

    build_candles(&executions, interval_secs)
}

/// Close prices in candle order
pub fn closes(candles: &[Candle]) -> Vec<Decimal> {
    candles.iter().map(|c| c.close).collect()
}

/// Mean of `delays`, truncated to whole milliseconds
///
/// A zero or negative mean yields zero; the sign is not preserved.
pub fn mean_delay(delays: &[chrono::Duration]) -> Duration {
    if delays.is_empty() {
        return Duration::ZERO;
    }

    let total_nanos: i128 = delays.iter().map(|d| nanos(*d)).sum();
    if total_nanos <= 0 {
        return Duration::ZERO;
    }

    let count = i128::try_from(delays.len()).unwrap_or(i128::MAX);
    let millis = total_nanos / (count * 1_000_000);
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}

/// Start of the first bucket
///
/// The remainder is taken from the second-of-minute, not from the epoch, so
/// the grid restarts every minute when `interval_secs` does not divide 60.
fn first_bucket_start(time: DateTime<Utc>, interval_secs: i64) -> DateTime<Utc> {
    let time = time.trunc_subsecs(0);
    let remainder = i64::from(time.second()) % interval_secs;
    time - chrono::Duration::seconds(remainder)
}

/// Check that `interval_secs` is usable as a bucket width
pub fn validate_interval(interval_secs: i64) -> Result<(), CandleError> {
    if interval_secs <= 0 {
        return Err(CandleError::InvalidInterval(interval_secs));
    }
    Ok(())
}

fn nanos(delay: chrono::Duration) -> i128 {
    match delay.num_nanoseconds() {
        Some(n) => i128::from(n),
        None => i128::from(delay.num_milliseconds()) * 1_000_000,
    }
}

/// Candle under construction
struct Bucket {
    start: DateTime<Utc>,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: Decimal,
    delays: Vec<chrono::Duration>,
}

impl Bucket {
    fn open(start: DateTime<Utc>, execution: &Execution) -> Self {
        Self {
            start,
            open: execution.price,
            high: execution.price,
            low: execution.price,
            close: execution.price,
            volume: execution.size,
            delays: vec![execution.delay],
        }
    }

    fn push(&mut self, execution: &Execution) {
        self.high = self.high.max(execution.price);
        self.low = self.low.min(execution.price);
        self.close = execution.price;
        self.volume += execution.size;
        self.delays.push(execution.delay);
    }

    fn finish(self) -> Candle {
        Candle {
            time: self.start,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            delay: mean_delay(&self.delays),
        }
    }
}
