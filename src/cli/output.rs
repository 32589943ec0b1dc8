//! Candle output formatting

use crate::ohlc::Candle;
use clap::ValueEnum;
use std::fmt::Write;

/// Output format for candle listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text columns
    #[default]
    Table,
    /// One JSON array
    Json,
}

/// Print candles to stdout
pub fn print_candles(candles: &[Candle], format: OutputFormat) -> anyhow::Result<()> {
    print!("{}", render_candles(candles, format)?);
    Ok(())
}

pub(crate) fn render_candles(candles: &[Candle], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(candles)?)),
        OutputFormat::Table => {
            let mut out = String::new();
            writeln!(
                out,
                "{:<20} {:>14} {:>14} {:>14} {:>14} {:>16} {:>9}",
                "time", "open", "high", "low", "close", "volume", "delay_ms"
            )?;
            for c in candles {
                writeln!(
                    out,
                    "{:<20} {:>14} {:>14} {:>14} {:>14} {:>16} {:>9}",
                    c.time.format("%Y-%m-%dT%H:%M:%S").to_string(),
                    c.open,
                    c.high,
                    c.low,
                    c.close,
                    c.volume,
                    c.delay.as_millis()
                )?;
            }
            Ok(out)
        }
    }
}
