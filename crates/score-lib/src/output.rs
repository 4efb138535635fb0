//! Prediction output post-processing
//!
//! Raw pipeline output is clamped into the valid score range and rounded
//! before it leaves the service.

use crate::models::PredictionResult;

/// Lowest score the service reports
pub const MIN_SCORE: f64 = 0.0;

/// Highest score the service reports
pub const MAX_SCORE: f64 = 100.0;

/// Decimal places kept in reported scores
pub const SCORE_DECIMALS: usize = 2;

/// Formats raw model outputs into a [`PredictionResult`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreFormatter;

impl ScoreFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Clamp then round a raw model output.
    ///
    /// NaN maps to the upper bound and infinities clamp to the nearest bound,
    /// so every output lands in range.
    pub fn format(&self, raw: f64) -> PredictionResult {
        let clamped = if raw.is_nan() {
            MAX_SCORE
        } else {
            raw.clamp(MIN_SCORE, MAX_SCORE)
        };
        PredictionResult {
            predicted_exam_score: round_half_even(clamped, SCORE_DECIMALS),
        }
    }
}

/// Round on the exact decimal value of `value`, ties to even.
///
/// Precision formatting is exact, so `72.125` (exactly representable) becomes
/// `72.12` rather than `72.13`.
fn round_half_even(value: f64, decimals: usize) -> f64 {
    let rounded = format!("{:.*}", decimals, value)
        .parse::<f64>()
        .unwrap_or(value);
    // normalize -0.0
    rounded + 0.0
}
