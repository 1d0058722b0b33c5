//! Metrics collection and exposition.
//!
//! # Metrics
//! - `vhost_requests_total` (counter): requests by outcome and status
//! - `vhost_request_duration_seconds` (histogram): resolution + send latency
//!
//! # Design Decisions
//! - Low-overhead metric updates; recording is a no-op until a recorder is installed
//! - Outcome labels are a small fixed set (served, redirect, forbidden, ...)
//! - Host is deliberately not a label to keep cardinality bounded

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one finished request.
pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    ::metrics::counter!(
        "vhost_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("vhost_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
