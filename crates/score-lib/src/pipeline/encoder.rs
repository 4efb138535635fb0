//! Feature encoding for pipeline inference
//!
//! Applies the fitted column transforms of an artifact to a [`FeatureRow`],
//! producing the dense vector the regressor consumes.

use super::artifact::{HandleUnknown, Transform};
use crate::error::PredictError;
use crate::models::{Cell, FeatureRow};

/// Turns named rows into dense feature vectors
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    transforms: Vec<Transform>,
    width: usize,
}

impl FeatureEncoder {
    pub fn new(transforms: Vec<Transform>) -> Self {
        let width = transforms.iter().map(Transform::width).sum();
        Self { transforms, width }
    }

    /// Length of every encoded vector
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn encode(&self, row: &FeatureRow) -> Result<Vec<f64>, PredictError> {
        let mut features = Vec::with_capacity(self.width);

        for transform in &self.transforms {
            let column = transform.column();
            let cell = row
                .get(column)
                .ok_or_else(|| PredictError::inference(format!("columns are missing: {{'{}'}}", column)))?;

            match transform {
                Transform::StandardScaler { mean, scale, .. } => {
                    let value = numeric(column, cell)?;
                    features.push(standardize(value, *mean, *scale));
                }
                Transform::Passthrough { .. } => {
                    features.push(numeric(column, cell)?);
                }
                Transform::OneHot {
                    categories,
                    handle_unknown,
                    ..
                } => {
                    let value = cell.to_string();
                    let position = categories.iter().position(|c| *c == value);
                    if position.is_none() && *handle_unknown == HandleUnknown::Error {
                        return Err(PredictError::inference(format!(
                            "Found unknown categories ['{}'] in column '{}' during transform",
                            value, column
                        )));
                    }
                    features.extend(
                        (0..categories.len()).map(|i| if Some(i) == position { 1.0 } else { 0.0 }),
                    );
                }
            }
        }

        Ok(features)
    }
}

fn numeric(column: &str, cell: &Cell) -> Result<f64, PredictError> {
    cell.as_f64().ok_or_else(|| {
        PredictError::inference(format!(
            "could not convert string to float: '{}' (column '{}')",
            cell, column
        ))
    })
}

/// Zero scale means the column was constant during fitting
fn standardize(value: f64, mean: f64, scale: f64) -> f64 {
    let scale = if scale == 0.0 { 1.0 } else { scale };
    (value - mean) / scale
}
