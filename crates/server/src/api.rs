//! HTTP API: prediction, health checks and Prometheus metrics

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use score_lib::{
    health::{components, ComponentStatus, HealthRegistry},
    PredictError, PredictionResult, PredictionService, StructuredLogger, StudentRecord,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: PredictionService,
    pub health_registry: HealthRegistry,
    pub logger: StructuredLogger,
}

impl AppState {
    pub fn new(
        service: PredictionService,
        health_registry: HealthRegistry,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            service,
            health_registry,
            logger,
        }
    }
}

/// Error body returned by `/predict`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Every prediction failure is reported to the caller as `400 Bad Request`,
/// including pipeline faults.
#[derive(Debug)]
pub struct ApiError {
    kind: &'static str,
    detail: String,
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        Self {
            kind: err.kind(),
            detail: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            kind: "request",
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

/// Score a student record
async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StudentRecord>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let start = Instant::now();
    let outcome = payload
        .map_err(ApiError::from)
        .and_then(|Json(record)| state.service.predict(&record).map_err(ApiError::from));

    match outcome {
        Ok(result) => {
            state
                .logger
                .log_prediction(result.predicted_exam_score, start.elapsed().as_micros());
            state.health_registry.clear_degraded(components::PIPELINE).await;
            Ok(Json(result))
        }
        Err(err) => {
            state.logger.log_rejection(err.kind, &err.detail);
            if err.kind == "inference" {
                state
                    .health_registry
                    .set_degraded(components::PIPELINE, err.detail.clone())
                    .await;
            }
            Err(err)
        }
    }
}

/// Health check response - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy | ComponentStatus::Degraded => StatusCode::OK,
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

/// CORS for a single credentialed origin. The origin is echoed only when it
/// matches; methods and headers are mirrored from the preflight request.
pub fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("Invalid CORS origin {:?}", origin))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Create the API router
pub fn create_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve the router on an already-bound listener until `shutdown` resolves
pub async fn serve<F>(listener: tokio::net::TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(addr = %addr, "Starting API server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("API server failed")?;

    Ok(())
}
