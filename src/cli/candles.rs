//! Candles command implementation

use super::output::{print_candles, OutputFormat};
use crate::api::{ExecutionQuery, RestClient, RestConfig};
use crate::config::Config;
use crate::ohlc::build_candles_from_raw;
use clap::Args;

#[derive(Args, Debug)]
pub struct CandlesArgs {
    /// Product code (defaults to the configured product)
    #[arg(long)]
    pub product: Option<String>,

    /// Candle interval in seconds (defaults to the configured interval)
    #[arg(long, allow_negative_numbers = true)]
    pub interval: Option<i64>,

    /// Number of recent executions to fetch
    #[arg(long, default_value = "500")]
    pub count: u32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl CandlesArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let product = self
            .product
            .as_deref()
            .unwrap_or(&config.candles.product_code);
        let interval = self.interval.unwrap_or(config.candles.interval_secs);

        let client = RestClient::with_config(RestConfig::from(&config.api))?;
        let mut executions = client
            .get_executions(&ExecutionQuery::new(product).count(self.count))
            .await?;

        // the endpoint returns newest first
        executions.sort_by_key(|e| e.id);

        let candles = build_candles_from_raw(&executions, None, interval)?;
        tracing::info!(
            product,
            interval,
            executions = executions.len(),
            candles = candles.len(),
            "Built candles"
        );

        print_candles(&candles, self.format)
    }
}
