//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, path, and status
//! - HTTP request latency histograms
//! - Creator script mutations by operation and outcome
//! - Brands processed and metric values written by the performance snapshot

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace("brand_admin"),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace("brand_admin")
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Creator script writes by operation ("create", "update", "delete") and outcome
pub static CREATOR_SCRIPT_MUTATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "creator_script_mutations_total",
            "Creator script writes by operation and outcome",
        )
        .namespace("brand_admin"),
        &["operation", "outcome"],
    )
    .expect("Failed to create CREATOR_SCRIPT_MUTATIONS_TOTAL metric")
});

/// Brands handled by the performance snapshot
pub static SNAPSHOT_BRANDS_PROCESSED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new(
            "snapshot_brands_processed_total",
            "Brands processed by the performance snapshot",
        )
        .namespace("brand_admin"),
    )
    .expect("Failed to create SNAPSHOT_BRANDS_PROCESSED_TOTAL metric")
});

/// Metric value rows written by the performance snapshot
pub static SNAPSHOT_VALUES_WRITTEN_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new(
            "snapshot_values_written_total",
            "Metric values written by the performance snapshot",
        )
        .namespace("brand_admin"),
    )
    .expect("Failed to create SNAPSHOT_VALUES_WRITTEN_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(CREATOR_SCRIPT_MUTATIONS_TOTAL.clone()))
        .expect("Failed to register CREATOR_SCRIPT_MUTATIONS_TOTAL");
    registry
        .register(Box::new(SNAPSHOT_BRANDS_PROCESSED_TOTAL.clone()))
        .expect("Failed to register SNAPSHOT_BRANDS_PROCESSED_TOTAL");
    registry
        .register(Box::new(SNAPSHOT_VALUES_WRITTEN_TOTAL.clone()))
        .expect("Failed to register SNAPSHOT_VALUES_WRITTEN_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Helper to record a creator script write
pub fn record_script_mutation(operation: &str, succeeded: bool) {
    let outcome = if succeeded { "success" } else { "failure" };
    CREATOR_SCRIPT_MUTATIONS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Helper to record one brand handled by the snapshot
pub fn record_snapshot_brand(values_written: usize) {
    SNAPSHOT_BRANDS_PROCESSED_TOTAL.inc();
    SNAPSHOT_VALUES_WRITTEN_TOTAL.inc_by(values_written as u64);
}
