//! CLI interface for lightning-ohlc
//!
//! Provides subcommands for:
//! - `candles`: Candles from the most recent executions
//! - `history`: Candles over a time range of execution history
//! - `stream`: Candles from the realtime feed, one batch per window
//! - `health`: Exchange health, board state and ticker
//! - `config`: Show configuration

mod candles;
mod health;
mod history;
mod output;
mod stream;

pub use candles::CandlesArgs;
pub use health::HealthArgs;
pub use history::HistoryArgs;
pub use output::{print_candles, OutputFormat};
pub use stream::StreamArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lightning-ohlc")]
#[command(about = "OHLC candles from exchange execution history and realtime trades")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build candles from the most recent executions
    Candles(CandlesArgs),
    /// Build candles over a time range of execution history
    History(HistoryArgs),
    /// Build candles from the realtime feed
    Stream(StreamArgs),
    /// Show exchange health and board state
    Health(HealthArgs),
    /// Show configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_candles_command() {
        let cli = Cli::parse_from([
            "lightning-ohlc",
            "candles",
            "--product",
            "FX_BTC_JPY",
            "--interval",
            "5",
            "--format",
            "json",
        ]);

        assert_eq!(cli.config, "config.toml");
        match cli.command {
            Commands::Candles(args) => {
                assert_eq!(args.product.as_deref(), Some("FX_BTC_JPY"));
                assert_eq!(args.interval, Some(5));
                assert_eq!(args.count, 500);
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_history_command() {
        let cli = Cli::parse_from([
            "lightning-ohlc",
            "--config",
            "other.toml",
            "history",
            "--from",
            "2019-03-01T00:00:00Z",
        ]);

        assert_eq!(cli.config, "other.toml");
        match cli.command {
            Commands::History(args) => {
                assert_eq!(args.from.to_rfc3339(), "2019-03-01T00:00:00+00:00");
                assert!(args.to.is_none());
                assert_eq!(args.format, OutputFormat::Table);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_stream_command() {
        let cli = Cli::parse_from(["lightning-ohlc", "stream", "--window-secs", "30"]);
        match cli.command {
            Commands::Stream(args) => {
                assert_eq!(args.window_secs, 30);
                assert!(args.windows.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let result = Cli::try_parse_from(["lightning-ohlc", "candles", "--format", "xml"]);
        assert!(result.is_err());
    }
}
