//! Prometheus metrics implementation.
//!
//! This module provides a concrete implementation of the `Metrics` trait
//! backed by an owned `prometheus::Registry`. Nothing global: each instance
//! carries its own registry and its own collectors, so `/metrics` renders
//! exactly what this instance observed and tests can run in parallel
//! without bleeding samples into each other.

use std::time::Instant;

use prometheus::{
    register_histogram_vec_with_registry, register_int_counter_vec_with_registry,
    register_int_gauge_with_registry, Encoder, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};

use crate::domain::Metrics;

/// Latency buckets in seconds, matching the dashboard the service feeds.
const DURATION_BUCKETS: &[f64] = &[0.1, 0.3, 0.5, 0.7, 1.0, 3.0, 5.0, 7.0, 10.0];

/// Prometheus-based metrics implementation.
///
/// Holds the registry and the handles used on the request path. The
/// `active_connections` gauge and the process collector are registered but
/// not held; the registry keeps them alive and gathers them on render.
pub struct PrometheusMetrics {
    registry: Registry,
    http_request_duration_seconds: HistogramVec,
    http_requests_total: IntCounterVec,
}

impl PrometheusMetrics {
    pub fn new() -> prometheus::Result<Self> {
        // ---
        let registry = Registry::new();

        let http_request_duration_seconds = register_histogram_vec_with_registry!(
            "http_request_duration_seconds",
            "Duration of HTTP requests in seconds",
            &["method", "route", "status_code"],
            DURATION_BUCKETS.to_vec(),
            registry.clone()
        )?;

        let http_requests_total = register_int_counter_vec_with_registry!(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "route", "status_code"],
            registry.clone()
        )?;

        // Stays at zero for now; the scrape consumers expect the series to
        // exist even before anything moves it.
        register_int_gauge_with_registry!(
            "active_connections",
            "Number of active connections",
            registry.clone()
        )?;

        // CPU, memory and fd gauges, same set the old default collectors gave.
        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(PrometheusMetrics {
            registry,
            http_request_duration_seconds,
            http_requests_total,
        })
    }
}

impl Metrics for PrometheusMetrics {
    // ---
    fn render(&self) -> String {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(err) = TextEncoder::new().encode(&metric_families, &mut buffer) {
            tracing::error!(%err, "failed to encode metrics");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }

    fn record_http_request(&self, start: Instant, route: &str, method: &str, status: u16) {
        let elapsed = start.elapsed().as_secs_f64();
        let status = status.to_string();
        let labels = [method, route, status.as_str()];

        self.http_request_duration_seconds
            .with_label_values(&labels)
            .observe(elapsed);
        self.http_requests_total.with_label_values(&labels).inc();
    }
}

// ---
