//! Prediction service: validate, infer, clamp, round

use crate::error::PredictError;
use crate::models::{PredictionResult, StudentRecord};
use crate::observability::ServiceMetrics;
use crate::output::ScoreFormatter;
use crate::pipeline::{InferencePipeline, PipelineInfo};
use crate::validation;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Stateless scorer over a shared, read-only pipeline
#[derive(Clone)]
pub struct PredictionService {
    pipeline: Arc<dyn InferencePipeline>,
    formatter: ScoreFormatter,
    metrics: ServiceMetrics,
}

impl PredictionService {
    pub fn new(pipeline: Arc<dyn InferencePipeline>) -> Self {
        Self {
            pipeline,
            formatter: ScoreFormatter::new(),
            metrics: ServiceMetrics::new(),
        }
    }

    pub fn pipeline_info(&self) -> PipelineInfo {
        self.pipeline.info()
    }

    /// Score one record, recording latency and outcome metrics
    pub fn predict(&self, record: &StudentRecord) -> Result<PredictionResult, PredictError> {
        let start = Instant::now();
        let outcome = self.score(record);
        self.metrics
            .observe_prediction_latency(start.elapsed().as_secs_f64());

        match &outcome {
            Ok(result) => {
                self.metrics.inc_predictions();
                debug!(score = result.predicted_exam_score, "Prediction scored");
            }
            Err(err) => self.metrics.inc_prediction_errors(err.kind()),
        }
        outcome
    }

    fn score(&self, record: &StudentRecord) -> Result<PredictionResult, PredictError> {
        validation::validate(record)?;

        let row = record.to_row();
        let outputs = self.pipeline.predict(std::slice::from_ref(&row))?;
        let raw = outputs
            .first()
            .copied()
            .ok_or_else(|| PredictError::inference("pipeline returned no predictions"))?;

        Ok(self.formatter.format(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::sample_record;
    use crate::models::FeatureRow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed raw value and counts calls
    struct FixedPipeline {
        value: f64,
        calls: AtomicUsize,
    }

    impl FixedPipeline {
        fn new(value: f64) -> Arc<Self> {
            Arc::new(Self {
                value,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl InferencePipeline for FixedPipeline {
        fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, PredictError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(rows.len(), 1);
            Ok(vec![self.value; rows.len()])
        }

        fn info(&self) -> PipelineInfo {
            PipelineInfo {
                name: "fixed".to_string(),
                version: "test".to_string(),
                backend: "stub".to_string(),
                feature_count: 0,
            }
        }
    }

    struct EmptyPipeline;

    impl InferencePipeline for EmptyPipeline {
        fn predict(&self, _rows: &[FeatureRow]) -> Result<Vec<f64>, PredictError> {
            Ok(Vec::new())
        }

        fn info(&self) -> PipelineInfo {
            PipelineInfo {
                name: "empty".to_string(),
                version: "test".to_string(),
                backend: "stub".to_string(),
                feature_count: 0,
            }
        }
    }

    #[test]
    fn test_prediction_rounded() {
        let service = PredictionService::new(FixedPipeline::new(81.23456));
        let result = service.predict(&sample_record()).unwrap();
        assert_eq!(result.predicted_exam_score, 81.23);
    }

    #[test]
    fn test_out_of_range_outputs_clamped() {
        let high = PredictionService::new(FixedPipeline::new(131.7));
        assert_eq!(high.predict(&sample_record()).unwrap().predicted_exam_score, 100.0);

        let low = PredictionService::new(FixedPipeline::new(-12.0));
        assert_eq!(low.predict(&sample_record()).unwrap().predicted_exam_score, 0.0);
    }

    #[test]
    fn test_invalid_record_never_reaches_pipeline() {
        let pipeline = FixedPipeline::new(50.0);
        let service = PredictionService::new(pipeline.clone());

        let mut record = sample_record();
        record.gender = "Unknown".to_string();
        let err = service.predict(&record).unwrap_err();

        assert!(err.to_string().contains("'gender'"));
        assert!(err.to_string().contains("['Male', 'Female', 'Other']"));
        assert_eq!(pipeline.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_output_is_inference_error() {
        let service = PredictionService::new(Arc::new(EmptyPipeline));
        let err = service.predict(&sample_record()).unwrap_err();
        assert_eq!(err.kind(), "inference");
    }

    #[test]
    fn test_nan_output_reported_as_max_score() {
        let service = PredictionService::new(FixedPipeline::new(f64::NAN));
        let result = service.predict(&sample_record()).unwrap();
        assert_eq!(result.predicted_exam_score, 100.0);
    }

    #[test]
    fn test_tie_rounds_to_even() {
        let service = PredictionService::new(FixedPipeline::new(72.125));
        assert_eq!(service.predict(&sample_record()).unwrap().predicted_exam_score, 72.12);
    }

    #[test]
    fn test_repeated_predictions_identical() {
        let service = PredictionService::new(FixedPipeline::new(64.129));
        let first = service.predict(&sample_record()).unwrap();
        let second = service.predict(&sample_record()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_predictions_share_pipeline() {
        let service = PredictionService::new(FixedPipeline::new(72.5));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                std::thread::spawn(move || service.predict(&sample_record()).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().predicted_exam_score, 72.5);
        }
    }
}
