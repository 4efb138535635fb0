//! Error types for prediction and artifact loading

use std::path::PathBuf;
use thiserror::Error;

/// Failure while serving a single prediction
#[derive(Debug, Error)]
pub enum PredictError {
    /// A categorical field held a value outside its allowed set
    #[error("Invalid value for '{field}'. Allowed: {}", format_allowed(.allowed))]
    Validation {
        field: &'static str,
        allowed: &'static [&'static str],
    },

    /// Conversion or pipeline evaluation failed
    #[error("{0}")]
    Inference(String),
}

impl PredictError {
    pub fn inference(message: impl Into<String>) -> Self {
        PredictError::Inference(message.into())
    }

    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::Validation { .. } => "validation",
            PredictError::Inference(_) => "inference",
        }
    }
}

impl From<anyhow::Error> for PredictError {
    fn from(err: anyhow::Error) -> Self {
        PredictError::Inference(format!("{:#}", err))
    }
}

/// Renders the allowed set as a bracketed, quoted list: `['Yes', 'No']`
fn format_allowed(allowed: &[&str]) -> String {
    let quoted: Vec<String> = allowed.iter().map(|v| format!("'{}'", v)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Failure while loading a pipeline artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid artifact: {0}")]
    Invalid(String),

    #[error("Checksum mismatch for {path:?}: expected {expected}, got {actual}")]
    Checksum {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Failed to load ONNX regressor: {0:#}")]
    Onnx(anyhow::Error),
}
