//! Regressors that map an encoded feature vector to a raw score

use super::onnx::OnnxRegressor;
use crate::error::PredictError;

/// Ordinary least squares model: `intercept + coefficients . features`
#[derive(Debug, Clone)]
pub struct LinearRegressor {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        if features.len() != self.coefficients.len() {
            return Err(PredictError::inference(format!(
                "X has {} features, but the regressor is expecting {} features as input",
                features.len(),
                self.coefficients.len()
            )));
        }
        let dot: f64 = features
            .iter()
            .zip(&self.coefficients)
            .map(|(x, w)| x * w)
            .sum();
        Ok(self.intercept + dot)
    }
}

/// Regressor backends an artifact can declare
pub enum Regressor {
    Linear(LinearRegressor),
    Onnx(OnnxRegressor),
}

impl Regressor {
    pub fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        match self {
            Regressor::Linear(model) => model.predict(features),
            Regressor::Onnx(model) => model.predict(features),
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Regressor::Linear(_) => "linear",
            Regressor::Onnx(_) => "onnx",
        }
    }
}
