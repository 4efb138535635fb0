//! On-disk pipeline artifact format
//!
//! A fitted pipeline is stored as JSON: an ordered list of column transforms
//! that build a dense feature vector, followed by a regressor that maps the
//! vector to a single score.

use crate::error::ArtifactError;
use crate::models::StudentRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Serialized fitted pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineArtifact {
    pub name: String,
    pub version: String,
    pub transforms: Vec<Transform>,
    pub regressor: RegressorSpec,
}

/// A fitted column transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    /// `(x - mean) / scale`, one feature
    StandardScaler { column: String, mean: f64, scale: f64 },
    /// One indicator feature per category
    OneHot {
        column: String,
        categories: Vec<String>,
        #[serde(default)]
        handle_unknown: HandleUnknown,
    },
    /// Raw numeric value, one feature
    Passthrough { column: String },
}

impl Transform {
    pub fn column(&self) -> &str {
        match self {
            Transform::StandardScaler { column, .. }
            | Transform::OneHot { column, .. }
            | Transform::Passthrough { column } => column,
        }
    }

    /// Number of features this transform contributes
    pub fn width(&self) -> usize {
        match self {
            Transform::OneHot { categories, .. } => categories.len(),
            _ => 1,
        }
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        let column = self.column();
        if !StudentRecord::COLUMNS.contains(&column) {
            return Err(ArtifactError::Invalid(format!(
                "transform references unknown column '{}'",
                column
            )));
        }
        match self {
            Transform::StandardScaler { mean, scale, .. } => {
                if !mean.is_finite() || !scale.is_finite() {
                    return Err(ArtifactError::Invalid(format!(
                        "scaler for '{}' has non-finite parameters",
                        column
                    )));
                }
            }
            Transform::OneHot { categories, .. } => {
                if categories.is_empty() {
                    return Err(ArtifactError::Invalid(format!(
                        "one-hot encoder for '{}' has no categories",
                        column
                    )));
                }
            }
            Transform::Passthrough { .. } => {}
        }
        Ok(())
    }
}

/// Behaviour of a one-hot encoder on a category it was not fitted with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    /// Emit an all-zero block
    #[default]
    Ignore,
    /// Fail the prediction
    Error,
}

/// Fitted regressor description
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressorSpec {
    Linear { coefficients: Vec<f64>, intercept: f64 },
    /// ONNX graph taking `[1, n_features]` f32; path is relative to the artifact
    Onnx {
        path: PathBuf,
        #[serde(default)]
        sha256: Option<String>,
    },
}

impl PipelineArtifact {
    /// Read and validate an artifact file
    pub fn from_path(path: &Path) -> Result<Self, ArtifactError> {
        let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ArtifactError> {
        let artifact: PipelineArtifact = serde_json::from_str(content)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Total width of the encoded feature vector
    pub fn feature_count(&self) -> usize {
        self.transforms.iter().map(Transform::width).sum()
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.transforms.is_empty() {
            return Err(ArtifactError::Invalid("pipeline has no transforms".to_string()));
        }
        for transform in &self.transforms {
            transform.validate()?;
        }

        if let RegressorSpec::Linear {
            coefficients,
            intercept,
        } = &self.regressor
        {
            let expected = self.feature_count();
            if coefficients.len() != expected {
                return Err(ArtifactError::Invalid(format!(
                    "linear regressor has {} coefficients, transforms produce {} features",
                    coefficients.len(),
                    expected
                )));
            }
            if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                return Err(ArtifactError::Invalid(
                    "linear regressor has non-finite parameters".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "name": "tiny",
        "version": "0.0.1",
        "transforms": [
            {"kind": "standard_scaler", "column": "study_hours_per_day", "mean": 3.5, "scale": 1.5},
            {"kind": "one_hot", "column": "part_time_job", "categories": ["No", "Yes"]}
        ],
        "regressor": {"kind": "linear", "coefficients": [9.5, 1.0, -1.0], "intercept": 70.0}
    }"#;

    #[test]
    fn test_parse_minimal_artifact() {
        let artifact = PipelineArtifact::from_json(MINIMAL).unwrap();
        assert_eq!(artifact.name, "tiny");
        assert_eq!(artifact.feature_count(), 3);
        match &artifact.transforms[1] {
            Transform::OneHot { handle_unknown, .. } => {
                assert_eq!(*handle_unknown, HandleUnknown::Ignore)
            }
            other => panic!("unexpected transform {:?}", other),
        }
    }

    #[test]
    fn test_coefficient_count_mismatch_rejected() {
        let json = MINIMAL.replace("[9.5, 1.0, -1.0]", "[9.5, 1.0]");
        let err = PipelineArtifact::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("2 coefficients"), "{}", err);
    }

    #[test]
    fn test_unknown_column_rejected() {
        let json = MINIMAL.replace("\"part_time_job\"", "\"shoe_size\"");
        let err = PipelineArtifact::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("shoe_size"));
    }

    #[test]
    fn test_empty_categories_rejected() {
        let json = MINIMAL.replace("[\"No\", \"Yes\"]", "[]");
        assert!(matches!(
            PipelineArtifact::from_json(&json),
            Err(ArtifactError::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_transform_kind_is_parse_error() {
        let json = MINIMAL.replace("standard_scaler", "robust_scaler");
        assert!(matches!(
            PipelineArtifact::from_json(&json),
            Err(ArtifactError::Parse(_))
        ));
    }

    #[test]
    fn test_onnx_regressor_parses_without_checksum() {
        let json = r#"{
            "name": "onnx",
            "version": "1",
            "transforms": [{"kind": "passthrough", "column": "age"}],
            "regressor": {"kind": "onnx", "path": "regressor.onnx"}
        }"#;
        let artifact = PipelineArtifact::from_json(json).unwrap();
        match artifact.regressor {
            RegressorSpec::Onnx { path, sha256 } => {
                assert_eq!(path, PathBuf::from("regressor.onnx"));
                assert!(sha256.is_none());
            }
            other => panic!("unexpected regressor {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = PipelineArtifact::from_path(Path::new("/nonexistent/pipeline.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }
}
