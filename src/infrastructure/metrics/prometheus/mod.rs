mod prometheus_metrics;

pub use prometheus_metrics::PrometheusMetrics;
use std::sync::Arc;

/// Creates a new Prometheus metrics implementation.
///
/// Every call builds its own registry, so two instances never see each
/// other's samples. The instance collects the HTTP request histogram and
/// counter plus process metrics, and renders them in Prometheus text
/// format for scraping.
///
/// Returns a fully initialized metrics instance ready for use.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    tracing::info!("Initializing Prometheus metrics");
    Ok(Arc::new(PrometheusMetrics::new()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_returns_valid_metrics() {
        let result = create();
        assert!(result.is_ok());
    }
}
