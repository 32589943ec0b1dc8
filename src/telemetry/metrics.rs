//! Prometheus metrics

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Receipt delay of a single streamed execution
    ExecutionReceive,
    /// Mean delay of an emitted candle
    CandleDelay,
    /// REST request round trip
    RestRequest,
}

impl LatencyMetric {
    fn name(self) -> &'static str {
        match self {
            LatencyMetric::ExecutionReceive => "lightning_execution_receive_delay_ms",
            LatencyMetric::CandleDelay => "lightning_candle_delay_ms",
            LatencyMetric::RestRequest => "lightning_rest_request_latency_ms",
        }
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let value_ms = duration.as_secs_f64() * 1000.0;
    metrics::histogram!(metric.name()).record(value_ms);
    tracing::trace!(metric = metric.name(), value_ms, "Recording latency");
}

/// Count executions received from the realtime feed
pub fn record_executions(product_code: &str, count: usize) {
    metrics::counter!(
        "lightning_executions_received_total",
        "product" => product_code.to_string()
    )
    .increment(count as u64);
}

/// Set the WebSocket connection gauge
pub fn set_connected(connected: bool) {
    metrics::gauge!("lightning_ws_connected").set(if connected { 1.0 } else { 0.0 });
}
