//! ONNX regressor backend using tract
//!
//! The graph receives the encoded feature vector as a `[1, n_features]` f32
//! tensor and its first output value is taken as the raw score.

use crate::error::{ArtifactError, PredictError};
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::Instant;
use tract_onnx::prelude::*;
use tracing::{debug, warn};

/// Maximum inference latency before warning
const MAX_INFERENCE_MS: u128 = 5;

type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Runnable ONNX regression graph
pub struct OnnxRegressor {
    model: TractModel,
    num_features: usize,
}

impl OnnxRegressor {
    /// Load a model file, verifying its checksum when one is given
    pub fn from_file(
        path: &Path,
        num_features: usize,
        sha256: Option<&str>,
    ) -> Result<Self, ArtifactError> {
        let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(expected) = sha256 {
            let actual = hex::encode(Sha256::digest(&bytes));
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(ArtifactError::Checksum {
                    path: path.to_path_buf(),
                    expected: expected.to_string(),
                    actual,
                });
            }
        }

        Self::from_bytes(&bytes, num_features).map_err(ArtifactError::Onnx)
    }

    pub fn from_bytes(model_bytes: &[u8], num_features: usize) -> Result<Self> {
        let model = Self::load_model(model_bytes, num_features)?;
        Ok(Self {
            model,
            num_features,
        })
    }

    fn load_model(model_bytes: &[u8], num_features: usize) -> Result<TractModel> {
        let model = tract_onnx::onnx()
            .model_for_read(&mut std::io::Cursor::new(model_bytes))
            .context("Failed to parse ONNX model")?
            .with_input_fact(0, f32::fact([1, num_features]).into())
            .context("Failed to set input shape")?
            .into_optimized()
            .context("Failed to optimize model")?
            .into_runnable()
            .context("Failed to create runnable model")?;
        Ok(model)
    }

    fn features_to_tensor(&self, features: &[f64]) -> Result<Tensor> {
        let data: Vec<f32> = features.iter().map(|v| *v as f32).collect();
        let array = tract_ndarray::Array2::from_shape_vec((1, self.num_features), data)
            .context("Feature vector does not match model input shape")?;
        Ok(array.into())
    }

    fn run(&self, features: &[f64]) -> Result<f64> {
        let input = self.features_to_tensor(features)?;
        let result = self.model.run(tvec!(input.into()))?;
        let output = result.first().context("No output from model")?;
        let view = output.to_array_view::<f32>()?;
        let value = view.iter().next().copied().context("Model output is empty")?;
        Ok(value as f64)
    }

    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        let start = Instant::now();
        let value = self.run(features)?;

        let elapsed = start.elapsed();
        if elapsed.as_millis() > MAX_INFERENCE_MS {
            warn!(elapsed_ms = elapsed.as_millis(), "Inference exceeded {}ms target", MAX_INFERENCE_MS);
        } else {
            debug!(elapsed_us = elapsed.as_micros(), "Inference completed");
        }

        Ok(value)
    }
}
