//! Health command implementation

use crate::api::{RestClient, RestConfig};
use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Product code (defaults to the configured product)
    #[arg(long)]
    pub product: Option<String>,
}

impl HealthArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let product = self
            .product
            .as_deref()
            .unwrap_or(&config.candles.product_code);

        let client = RestClient::with_config(RestConfig::from(&config.api))?;
        let health = client.get_health(product).await?;
        let state = client.get_board_state(product).await?;
        let ticker = client.get_ticker(product).await?;

        println!("{} status", product);
        println!("  Health: {:?}", health.status);
        println!("  Board:  {:?} ({:?})", state.state, state.health);
        println!(
            "  Ticker: ltp={} bid={} ask={} spread={}",
            ticker.ltp,
            ticker.best_bid,
            ticker.best_ask,
            ticker.spread()
        );
        println!("  Updated: {}", ticker.timestamp);

        Ok(())
    }
}
