//! Score server - exam score prediction service
//!
//! Loads the fitted pipeline once at startup and serves `POST /predict`
//! alongside health and metrics endpoints.

use anyhow::{Context, Result};
use score_lib::{
    health::{components, HealthRegistry},
    FittedPipeline, InferencePipeline, PredictionService, ServiceMetrics, StructuredLogger,
};
use score_server::{api, config::ServerConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVICE_NAME: &str = "score-server";
const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting score-server");

    let config = ServerConfig::load()?;
    info!(model_path = %config.model_path.display(), "Server configured");

    let health_registry = HealthRegistry::new();
    health_registry.register(components::PIPELINE).await;
    health_registry.register(components::HTTP).await;

    let logger = StructuredLogger::new(SERVICE_NAME);
    let metrics = ServiceMetrics::new();

    let pipeline = FittedPipeline::load(&config.model_path).with_context(|| {
        format!(
            "Failed to load inference pipeline from {}",
            config.model_path.display()
        )
    })?;
    let pipeline_info = pipeline.info();
    metrics.set_model_info(&pipeline_info);
    logger.log_pipeline_loaded(&config.model_path.display().to_string(), &pipeline_info);

    let service = PredictionService::new(Arc::new(pipeline));
    let app_state = Arc::new(api::AppState::new(
        service,
        health_registry.clone(),
        logger.clone(),
    ));
    let app = api::create_router(app_state, api::cors_layer(&config.cors_origin)?);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    health_registry.set_ready(true).await;
    logger.log_startup(SERVICE_VERSION, &addr);

    let shutdown_logger = logger.clone();
    api::serve(listener, app, async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => shutdown_logger.log_shutdown("SIGINT received"),
            Err(err) => {
                tracing::error!(error = %err, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        }
    })
    .await?;

    info!("Shutting down");
    Ok(())
}
