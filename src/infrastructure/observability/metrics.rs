//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use super::config::MetricsConfig;
use crate::domain::{ArtifactStatus, DomainError};

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
    path: String,
}

impl PrometheusMetrics {
    pub fn new(handle: PrometheusHandle, path: impl Into<String>) -> Self {
        Self {
            handle: Arc::new(handle),
            path: path.into(),
        }
    }

    /// Get the metrics as a string for the metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("safewater_predictor_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics::new(handle, config.path.clone()))
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics) -> Router {
    let path = metrics.path.clone();

    Router::new()
        .route(&path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric under its matched route, if any
pub fn record_http_request(method: &str, route: Option<&str>, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", route_label(route)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Record the outcome of one prediction attempt
pub fn record_prediction(result: &Result<f64, DomainError>, duration: Duration) {
    let outcome = match result {
        Ok(_) => "success",
        Err(e) => e.kind(),
    };
    let labels = [("outcome", outcome.to_string())];

    counter!("predictions_total", &labels).increment(1);
    histogram!("prediction_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Publish artifact load state as gauges
pub fn record_artifact_statuses(statuses: &[ArtifactStatus]) {
    for status in statuses {
        gauge!("artifact_loaded", "artifact" => status.kind.as_str())
            .set(if status.loaded { 1.0 } else { 0.0 });
    }
}

/// Route templates keep cardinality bounded; unmatched requests share one label
fn route_label(route: Option<&str>) -> String {
    match route {
        Some(r) if r.starts_with("/static") => "/static".to_string(),
        Some(r) => r.to_string(),
        None => "other".to_string(),
    }
}
