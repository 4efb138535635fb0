//! Offline artifact inspection

use anyhow::{Context, Result};
use colored::Colorize;
use score_lib::pipeline::Transform;
use score_lib::{FittedPipeline, InferencePipeline, PredictionService};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tabled::Tabled;

use super::predict::read_record;
use crate::output::{color_score, print_info, print_json, print_table, OutputFormat};

#[derive(Tabled)]
struct TransformRow {
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "Transform")]
    kind: String,
    #[tabled(rename = "Features")]
    width: usize,
    #[tabled(rename = "Parameters")]
    parameters: String,
}

impl From<&Transform> for TransformRow {
    fn from(transform: &Transform) -> Self {
        let (kind, parameters) = match transform {
            Transform::StandardScaler { mean, scale, .. } => (
                "standard_scaler",
                format!("mean={:.4} scale={:.4}", mean, scale),
            ),
            Transform::OneHot {
                categories,
                handle_unknown,
                ..
            } => (
                "one_hot",
                format!("{} (unknown: {:?})", categories.join(", "), handle_unknown),
            ),
            Transform::Passthrough { .. } => ("passthrough", "-".to_string()),
        };
        Self {
            column: transform.column().to_string(),
            kind: kind.to_string(),
            width: transform.width(),
            parameters,
        }
    }
}

/// Load an artifact locally, describe it, and optionally score a record with it
pub fn inspect(path: &Path, record_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let pipeline = FittedPipeline::load(path)
        .with_context(|| format!("Failed to load pipeline artifact {}", path.display()))?;
    let info = pipeline.info();
    let rows: Vec<TransformRow> = pipeline.transforms().iter().map(TransformRow::from).collect();

    let service = PredictionService::new(Arc::new(pipeline));
    let prediction = match record_path {
        Some(record_path) => Some(service.predict(&read_record(record_path)?)?),
        None => None,
    };

    match format {
        OutputFormat::Json => {
            print_json(&json!({ "pipeline": info, "prediction": prediction }))?;
        }
        OutputFormat::Table => {
            println!("{}", "Pipeline Artifact".bold());
            println!("{}", "=".repeat(40));
            println!("Name:     {}", info.name.cyan());
            println!("Version:  {}", info.version.cyan());
            println!("Backend:  {}", info.backend);
            println!("Features: {}", info.feature_count);
            println!();
            print_table(rows);

            if let Some(result) = prediction {
                print_info(&format!(
                    "Local prediction: {}",
                    color_score(result.predicted_exam_score)
                ));
            }
        }
    }

    Ok(())
}
