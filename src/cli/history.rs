//! History command implementation

use super::output::{print_candles, OutputFormat};
use crate::api::{RestClient, RestConfig};
use crate::config::Config;
use crate::ohlc::{build_candles, validate_interval};
use chrono::{DateTime, Utc};
use clap::Args;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Product code (defaults to the configured product)
    #[arg(long)]
    pub product: Option<String>,

    /// Candle interval in seconds (defaults to the configured interval)
    #[arg(long, allow_negative_numbers = true)]
    pub interval: Option<i64>,

    /// Start time (RFC 3339)
    #[arg(long)]
    pub from: DateTime<Utc>,

    /// End time (RFC 3339), defaults to now
    #[arg(long)]
    pub to: Option<DateTime<Utc>>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl HistoryArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let product = self
            .product
            .as_deref()
            .unwrap_or(&config.candles.product_code);
        let interval = self.interval.unwrap_or(config.candles.interval_secs);
        let to = self.to.unwrap_or_else(Utc::now);

        validate_interval(interval)?;
        if to < self.from {
            anyhow::bail!("--to ({}) is before --from ({})", to, self.from);
        }

        let client = RestClient::with_config(RestConfig::from(&config.api))?;
        let executions = client.executions_between(product, self.from, to).await?;
        let candles = build_candles(&executions, interval)?;

        tracing::info!(
            product,
            interval,
            from = %self.from,
            to = %to,
            executions = executions.len(),
            candles = candles.len(),
            "Built candles from history"
        );

        print_candles(&candles, self.format)
    }
}
