use clap::Parser;
use lightning_ohlc::cli::{Cli, Commands};
use lightning_ohlc::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    let _telemetry = lightning_ohlc::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Candles(args) => {
            tracing::info!("Building candles from recent executions");
            args.execute(&config).await?;
        }
        Commands::History(args) => {
            tracing::info!("Building candles from execution history");
            args.execute(&config).await?;
        }
        Commands::Stream(args) => {
            tracing::info!("Starting realtime candle stream");
            args.execute(&config).await?;
        }
        Commands::Health(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  API: {}/v{} (retry {}x on {:?})",
                config.api.base_url,
                config.api.api_version,
                config.api.retry_limit,
                config.api.retry_statuses
            );
            println!("  Realtime: {}", config.realtime.url);
            println!(
                "  Candles: {} every {}s",
                config.candles.product_code, config.candles.interval_secs
            );
            println!(
                "  Telemetry: level={} format={:?} metrics_port={:?}",
                config.telemetry.log_level,
                config.telemetry.log_format,
                config.telemetry.metrics_port
            );
        }
    }

    Ok(())
}
