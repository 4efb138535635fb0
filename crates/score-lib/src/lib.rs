//! Core library for the exam score prediction service
//!
//! This crate provides:
//! - The student record data model and categorical validation
//! - Loading and evaluating fitted inference pipelines
//! - Clamping and rounding of predicted scores
//! - Health checks and observability

pub mod error;
pub mod health;
pub mod models;
pub mod observability;
pub mod output;
pub mod pipeline;
pub mod service;
pub mod validation;

pub use error::{ArtifactError, PredictError};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{ServiceMetrics, StructuredLogger};
pub use pipeline::{FittedPipeline, InferencePipeline, PipelineInfo};
pub use service::PredictionService;
pub use validation::CategoricalField;
