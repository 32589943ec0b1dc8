//! Stream command implementation

use super::output::{print_candles, OutputFormat};
use crate::config::Config;
use crate::ohlc::{build_candles, validate_interval, Candle, CandleError, Execution};
use crate::realtime::{ExecutionFeed, LightningFeed};
use crate::telemetry::{self, LatencyMetric};
use clap::Args;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Product code (defaults to the configured product)
    #[arg(long)]
    pub product: Option<String>,

    /// Candle interval in seconds (defaults to the configured interval)
    #[arg(long, allow_negative_numbers = true)]
    pub interval: Option<i64>,

    /// Seconds of executions to buffer before building candles
    #[arg(long, default_value = "60")]
    pub window_secs: u64,

    /// Stop after this many windows
    #[arg(long)]
    pub windows: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl StreamArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let product = self
            .product
            .clone()
            .unwrap_or_else(|| config.candles.product_code.clone());
        let interval = self.interval.unwrap_or(config.candles.interval_secs);

        // fail on a bad interval before opening the connection
        validate_interval(interval)?;

        let feed = LightningFeed::from_config(product.clone(), &config.realtime);
        let mut batches = feed.subscribe().await?;

        let mut ticker = tokio::time::interval(Duration::from_secs(self.window_secs.max(1)));
        ticker.tick().await;

        let mut buffer: Vec<Execution> = Vec::new();
        let mut flushed = 0u32;

        tracing::info!(%product, interval, window_secs = self.window_secs, "Streaming candles");

        loop {
            tokio::select! {
                batch = batches.recv() => match batch {
                    Some(batch) => buffer.extend(batch),
                    None => {
                        tracing::warn!("Execution feed closed");
                        self.flush(&mut buffer, interval)?;
                        break;
                    }
                },
                _ = ticker.tick() => {
                    self.flush(&mut buffer, interval)?;
                    flushed += 1;
                    if self.windows.is_some_and(|limit| flushed >= limit) {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, flushing last window");
                    self.flush(&mut buffer, interval)?;
                    break;
                }
            }
        }

        Ok(())
    }

    /// Build and print candles for one window, then clear it
    fn flush(&self, buffer: &mut Vec<Execution>, interval: i64) -> anyhow::Result<()> {
        if buffer.is_empty() {
            tracing::debug!("Empty window");
            return Ok(());
        }

        let candles = window_candles(buffer, interval)?;
        for candle in &candles {
            telemetry::record_latency(LatencyMetric::CandleDelay, candle.delay);
        }
        tracing::info!(
            executions = buffer.len(),
            candles = candles.len(),
            "Window complete"
        );

        buffer.clear();
        print_candles(&candles, self.format)
    }
}

/// Candles for one buffered window
///
/// Batches normally arrive in order, but a reconnect can interleave them,
/// so the window is sorted by time (then id) first.
fn window_candles(buffer: &mut [Execution], interval: i64) -> Result<Vec<Candle>, CandleError> {
    buffer.sort_by(|a, b| a.time.cmp(&b.time).then(a.id.cmp(&b.id)));
    build_candles(buffer, interval)
}
