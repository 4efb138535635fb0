//! Observability infrastructure for the prediction service
//!
//! Provides:
//! - Prometheus metrics (prediction latency, served and failed predictions, model info)
//! - Structured JSON logging with tracing

use crate::pipeline::PipelineInfo;
use prometheus::{
    register_gauge_vec, register_histogram, register_int_counter, register_int_counter_vec,
    GaugeVec, Histogram, IntCounter, IntCounterVec,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Histogram buckets for prediction latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<ServiceMetricsInner> = OnceLock::new();

struct ServiceMetricsInner {
    prediction_latency_seconds: Histogram,
    predictions_total: IntCounter,
    prediction_errors_total: IntCounterVec,
    model_info: GaugeVec,
}

impl ServiceMetricsInner {
    fn new() -> Self {
        Self {
            prediction_latency_seconds: register_histogram!(
                "score_service_prediction_latency_seconds",
                "Time spent validating and scoring a prediction request",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register prediction_latency_seconds"),

            predictions_total: register_int_counter!(
                "score_service_predictions_total",
                "Number of predictions served successfully"
            )
            .expect("Failed to register predictions_total"),

            prediction_errors_total: register_int_counter_vec!(
                "score_service_prediction_errors_total",
                "Number of rejected prediction requests by error kind",
                &["kind"]
            )
            .expect("Failed to register prediction_errors_total"),

            model_info: register_gauge_vec!(
                "score_service_model_info",
                "Information about the loaded inference pipeline",
                &["name", "version", "backend"]
            )
            .expect("Failed to register model_info"),
        }
    }
}

/// Handle to the process-wide Prometheus metrics.
///
/// Clones share the same underlying collectors.
#[derive(Clone)]
pub struct ServiceMetrics {
    _private: (),
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ServiceMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ServiceMetricsInner {
        GLOBAL_METRICS.get_or_init(ServiceMetricsInner::new)
    }

    pub fn observe_prediction_latency(&self, duration_secs: f64) {
        self.inner().prediction_latency_seconds.observe(duration_secs);
    }

    pub fn inc_predictions(&self) {
        self.inner().predictions_total.inc();
    }

    pub fn inc_prediction_errors(&self, kind: &str) {
        self.inner()
            .prediction_errors_total
            .with_label_values(&[kind])
            .inc();
    }

    pub fn predictions_served(&self) -> u64 {
        self.inner().predictions_total.get()
    }

    pub fn prediction_errors(&self, kind: &str) -> u64 {
        self.inner()
            .prediction_errors_total
            .with_label_values(&[kind])
            .get()
    }

    /// Publish the identity of the loaded pipeline
    pub fn set_model_info(&self, info: &PipelineInfo) {
        self.inner().model_info.reset();
        self.inner()
            .model_info
            .with_label_values(&[info.name.as_str(), info.version.as_str(), info.backend.as_str()])
            .set(1.0);
    }
}

/// Structured logger for service events
#[derive(Clone)]
pub struct StructuredLogger {
    service: String,
}

impl StructuredLogger {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn log_startup(&self, version: &str, addr: &str) {
        info!(
            event = "service_started",
            service = %self.service,
            service_version = %version,
            addr = %addr,
            "Prediction service started"
        );
    }

    pub fn log_pipeline_loaded(&self, path: &str, info: &PipelineInfo) {
        info!(
            event = "pipeline_loaded",
            service = %self.service,
            path = %path,
            model_name = %info.name,
            model_version = %info.version,
            backend = %info.backend,
            feature_count = info.feature_count,
            "Inference pipeline loaded"
        );
    }

    pub fn log_prediction(&self, score: f64, elapsed_us: u128) {
        info!(
            event = "prediction_served",
            service = %self.service,
            predicted_exam_score = score,
            elapsed_us = elapsed_us as u64,
            "Served prediction"
        );
    }

    pub fn log_rejection(&self, kind: &str, detail: &str) {
        warn!(
            event = "prediction_rejected",
            service = %self.service,
            kind = %kind,
            detail = %detail,
            "Rejected prediction request"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            service = %self.service,
            reason = %reason,
            "Prediction service shutting down"
        );
    }
}
