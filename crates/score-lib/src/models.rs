//! Core data models for the prediction service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Student habit record submitted for prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub age: i64,
    pub gender: String,
    pub study_hours_per_day: f64,
    pub social_media_hours: f64,
    pub netflix_hours: f64,
    pub part_time_job: String,
    pub attendance_percentage: f64,
    pub sleep_hours: f64,
    pub diet_quality: String,
    pub exercise_frequency: i64,
    pub parental_education_level: String,
    pub internet_quality: String,
    pub mental_health_rating: i64,
    pub extracurricular_participation: String,
}

impl StudentRecord {
    /// Column names in the order they appear in a feature row
    pub const COLUMNS: [&'static str; 14] = [
        "age",
        "gender",
        "study_hours_per_day",
        "social_media_hours",
        "netflix_hours",
        "part_time_job",
        "attendance_percentage",
        "sleep_hours",
        "diet_quality",
        "exercise_frequency",
        "parental_education_level",
        "internet_quality",
        "mental_health_rating",
        "extracurricular_participation",
    ];

    /// Convert into the single-row layout the inference pipeline consumes
    pub fn to_row(&self) -> FeatureRow {
        FeatureRow::new(vec![
            ("age", Cell::Int(self.age)),
            ("gender", Cell::Str(self.gender.clone())),
            ("study_hours_per_day", Cell::Float(self.study_hours_per_day)),
            ("social_media_hours", Cell::Float(self.social_media_hours)),
            ("netflix_hours", Cell::Float(self.netflix_hours)),
            ("part_time_job", Cell::Str(self.part_time_job.clone())),
            ("attendance_percentage", Cell::Float(self.attendance_percentage)),
            ("sleep_hours", Cell::Float(self.sleep_hours)),
            ("diet_quality", Cell::Str(self.diet_quality.clone())),
            ("exercise_frequency", Cell::Int(self.exercise_frequency)),
            (
                "parental_education_level",
                Cell::Str(self.parental_education_level.clone()),
            ),
            ("internet_quality", Cell::Str(self.internet_quality.clone())),
            ("mental_health_rating", Cell::Int(self.mental_health_rating)),
            (
                "extracurricular_participation",
                Cell::Str(self.extracurricular_participation.clone()),
            ),
        ])
    }
}

/// Prediction response body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_exam_score: f64,
}

/// A single value in a feature row
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Cell {
    /// Numeric view of the cell, `None` for strings
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            Cell::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Str(s) => write!(f, "{}", s),
        }
    }
}

/// One named row of input to an inference pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    columns: Vec<(&'static str, Cell)>,
}

impl FeatureRow {
    pub fn new(columns: Vec<(&'static str, Cell)>) -> Self {
        Self { columns }
    }

    /// Look up a cell by column name
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, cell)| cell)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_record;
    use super::*;

    #[test]
    fn test_row_has_every_column() {
        let row = sample_record().to_row();
        for column in StudentRecord::COLUMNS {
            assert!(row.get(column).is_some(), "missing {}", column);
        }
        assert_eq!(row.get("final_grade"), None);
    }

    #[test]
    fn test_row_lookup() {
        let row = sample_record().to_row();
        assert_eq!(row.get("age"), Some(&Cell::Int(20)));
        assert_eq!(row.get("gender").and_then(Cell::as_str), Some("Male"));
        assert_eq!(row.get("sleep_hours").and_then(Cell::as_f64), Some(7.0));
        assert!(row.get("shoe_size").is_none());
    }

    #[test]
    fn test_record_rejects_missing_field() {
        let json = r#"{"age": 20, "gender": "Male"}"#;
        let parsed: Result<StudentRecord, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_result_serializes_field_name() {
        let result = PredictionResult {
            predicted_exam_score: 81.25,
        };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["predicted_exam_score"], 81.25);
    }
}
