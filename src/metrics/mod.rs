//! Prometheus metrics for the search service.
//!
//! - HTTP request counts and latency (via [`track_http_metrics`])
//! - Search executions, latency and result sizes
//! - Grouping calls per strategy
//!
//! # Example
//! ```no_run
//! use mes_global_search::metrics::{init_metrics, SEARCH_REQUESTS_TOTAL};
//!
//! init_metrics().unwrap();
//! SEARCH_REQUESTS_TOTAL.with_label_values(&["success"]).inc();
//! ```
use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use lazy_static::lazy_static;
use prometheus::{CounterVec, Histogram, HistogramOpts, HistogramVec, Opts, Registry};
use std::time::Instant;

const NAMESPACE: &str = "mes_global_search";

lazy_static! {
    /// Global Prometheus registry for all metrics
    pub static ref PROMETHEUS_REGISTRY: Registry = Registry::new();

    // ============================================================================
    // HTTP Metrics
    // ============================================================================

    /// Total number of HTTP requests received
    ///
    /// Labels: method, path, status_code
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests")
            .namespace(NAMESPACE),
        &["method", "path", "status_code"]
    ).expect("Failed to create HTTP_REQUESTS_TOTAL metric");

    /// HTTP request duration in seconds
    ///
    /// Labels: method, path
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds"
        )
        .namespace(NAMESPACE)
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
        &["method", "path"]
    ).expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric");

    // ============================================================================
    // Search Metrics
    // ============================================================================

    /// Search executions
    ///
    /// Labels: outcome (success, error)
    pub static ref SEARCH_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("search_requests_total", "Total number of search executions")
            .namespace(NAMESPACE),
        &["outcome"]
    ).expect("Failed to create SEARCH_REQUESTS_TOTAL metric");

    /// Time spent scoring and selecting results
    pub static ref SEARCH_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new("search_duration_seconds", "Search execution time in seconds")
            .namespace(NAMESPACE)
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
    ).expect("Failed to create SEARCH_DURATION_SECONDS metric");

    /// Number of results returned per search
    pub static ref SEARCH_RESULTS_RETURNED: Histogram = Histogram::with_opts(
        HistogramOpts::new("search_results_returned", "Results returned per search")
            .namespace(NAMESPACE)
            .buckets(vec![0.0, 1.0, 5.0, 10.0, 20.0, 50.0]),
    ).expect("Failed to create SEARCH_RESULTS_RETURNED metric");

    // ============================================================================
    // Grouping Metrics
    // ============================================================================

    /// Grouping calls
    ///
    /// Labels: strategy (as reported in the grouped output)
    pub static ref GROUPING_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("grouping_requests_total", "Total number of grouping calls")
            .namespace(NAMESPACE),
        &["strategy"]
    ).expect("Failed to create GROUPING_REQUESTS_TOTAL metric");
}

/// Register every metric with [`PROMETHEUS_REGISTRY`].
///
/// Safe to call more than once; already-registered collectors are skipped.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(HTTP_REQUESTS_TOTAL.clone()),
        Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()),
        Box::new(SEARCH_REQUESTS_TOTAL.clone()),
        Box::new(SEARCH_DURATION_SECONDS.clone()),
        Box::new(SEARCH_RESULTS_RETURNED.clone()),
        Box::new(GROUPING_REQUESTS_TOTAL.clone()),
    ];

    for collector in collectors {
        match PROMETHEUS_REGISTRY.register(collector) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Gather all metrics in Prometheus text format
pub fn gather_metrics() -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = PROMETHEUS_REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::from("# Error encoding metrics\n");
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Failed to convert metrics to string: {}", e);
        String::from("# Error converting metrics\n")
    })
}

/// Record count and latency of every routed request
pub async fn track_http_metrics(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let start = Instant::now();
    let response = next.run(req).await;

    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, response.status().as_str()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[&method, &path])
        .observe(start.elapsed().as_secs_f64());

    response
}
