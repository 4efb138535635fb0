//! Fitted inference pipeline
//!
//! A pipeline is loaded once from an artifact on disk and then only read.
//! Request handlers receive it as `Arc<dyn InferencePipeline>` so tests can
//! substitute their own implementation.

mod artifact;
mod encoder;
mod onnx;
mod regressor;

pub use artifact::{HandleUnknown, PipelineArtifact, RegressorSpec, Transform};
pub use encoder::FeatureEncoder;
pub use onnx::OnnxRegressor;
pub use regressor::{LinearRegressor, Regressor};

use crate::error::{ArtifactError, PredictError};
use crate::models::FeatureRow;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Trait for pipeline implementations
pub trait InferencePipeline: Send + Sync {
    /// Predict one raw score per input row
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, PredictError>;

    /// Describe the loaded pipeline
    fn info(&self) -> PipelineInfo;
}

/// Identifying details of a loaded pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineInfo {
    pub name: String,
    pub version: String,
    pub backend: String,
    pub feature_count: usize,
}

/// Pipeline built from a [`PipelineArtifact`]
pub struct FittedPipeline {
    name: String,
    version: String,
    encoder: FeatureEncoder,
    regressor: Regressor,
}

impl FittedPipeline {
    /// Load an artifact file; ONNX paths resolve relative to its directory
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let artifact = PipelineArtifact::from_path(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_artifact(artifact, base_dir)
    }

    pub fn from_artifact(artifact: PipelineArtifact, base_dir: &Path) -> Result<Self, ArtifactError> {
        artifact.validate()?;
        let feature_count = artifact.feature_count();

        let regressor = match artifact.regressor {
            RegressorSpec::Linear {
                coefficients,
                intercept,
            } => Regressor::Linear(LinearRegressor::new(coefficients, intercept)),
            RegressorSpec::Onnx { path, sha256 } => {
                let model_path = base_dir.join(path);
                Regressor::Onnx(OnnxRegressor::from_file(
                    &model_path,
                    feature_count,
                    sha256.as_deref(),
                )?)
            }
        };

        debug!(
            name = %artifact.name,
            version = %artifact.version,
            backend = regressor.backend(),
            feature_count,
            "Pipeline constructed"
        );

        Ok(Self {
            name: artifact.name,
            version: artifact.version,
            encoder: FeatureEncoder::new(artifact.transforms),
            regressor,
        })
    }

    pub fn transforms(&self) -> &[Transform] {
        self.encoder.transforms()
    }

    /// Score a single row
    pub fn predict_row(&self, row: &FeatureRow) -> Result<f64, PredictError> {
        let features = self.encoder.encode(row)?;
        self.regressor.predict(&features)
    }
}

impl InferencePipeline for FittedPipeline {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, PredictError> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }

    fn info(&self) -> PipelineInfo {
        PipelineInfo {
            name: self.name.clone(),
            version: self.version.clone(),
            backend: self.regressor.backend().to_string(),
            feature_count: self.encoder.width(),
        }
    }
}
