//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method and status
//! - `proxy_request_duration_seconds` (histogram): end-to-end latency
//! - `proxy_cache_hits_total` / `proxy_cache_misses_total` (counters)
//! - `proxy_cache_evictions_total` (counter)
//! - `proxy_cache_entries` / `proxy_cache_bytes` (gauges)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record a completed client request.
pub fn record_request(method: &str, status: u16, start_time: Instant) {
    metrics::counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("proxy_request_duration_seconds", "method" => method.to_string())
        .record(start_time.elapsed().as_secs_f64());
}

pub fn record_cache_hit() {
    metrics::counter!("proxy_cache_hits_total").increment(1);
}

pub fn record_cache_miss() {
    metrics::counter!("proxy_cache_misses_total").increment(1);
}

pub fn record_cache_eviction() {
    metrics::counter!("proxy_cache_evictions_total").increment(1);
}

/// Record the store's current entry count and charged bytes.
pub fn record_cache_size(entries: usize, bytes: u64) {
    metrics::gauge!("proxy_cache_entries").set(entries as f64);
    metrics::gauge!("proxy_cache_bytes").set(bytes as f64);
}
