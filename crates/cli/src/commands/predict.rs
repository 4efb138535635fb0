//! Prediction request command

use anyhow::{Context, Result};
use clap::Args;
use score_lib::{validation, StudentRecord};
use std::path::{Path, PathBuf};
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{color_score, print_json, print_success, print_table, OutputFormat};

/// Record fields, given one flag per field or as a JSON file
#[derive(Args, Debug, Default)]
pub struct PredictArgs {
    /// Read the record from a JSON file instead of flags
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Skip the local categorical check and let the server validate
    #[arg(long)]
    pub no_validate: bool,

    #[arg(long, required_unless_present = "file")]
    pub age: Option<i64>,

    /// Male, Female or Other
    #[arg(long, required_unless_present = "file")]
    pub gender: Option<String>,

    #[arg(long, required_unless_present = "file")]
    pub study_hours_per_day: Option<f64>,

    #[arg(long, required_unless_present = "file")]
    pub social_media_hours: Option<f64>,

    #[arg(long, required_unless_present = "file")]
    pub netflix_hours: Option<f64>,

    /// Yes or No
    #[arg(long, required_unless_present = "file")]
    pub part_time_job: Option<String>,

    #[arg(long, required_unless_present = "file")]
    pub attendance_percentage: Option<f64>,

    #[arg(long, required_unless_present = "file")]
    pub sleep_hours: Option<f64>,

    /// Poor, Fair or Good
    #[arg(long, required_unless_present = "file")]
    pub diet_quality: Option<String>,

    /// Times per week
    #[arg(long, required_unless_present = "file")]
    pub exercise_frequency: Option<i64>,

    /// "High School", Bachelor, Master or no_education
    #[arg(long, required_unless_present = "file")]
    pub parental_education_level: Option<String>,

    /// Poor, Average or Good
    #[arg(long, required_unless_present = "file")]
    pub internet_quality: Option<String>,

    /// Scale of 1 to 10
    #[arg(long, required_unless_present = "file")]
    pub mental_health_rating: Option<i64>,

    /// Yes or No
    #[arg(long, required_unless_present = "file")]
    pub extracurricular_participation: Option<String>,
}

fn required<T>(value: Option<T>, flag: &str) -> Result<T> {
    value.with_context(|| format!("Missing required flag --{}", flag.replace('_', "-")))
}

/// Read a record from a JSON file
pub fn read_record(path: &Path) -> Result<StudentRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file {}", path.display()))?;
    serde_json::from_str(&content).context("Failed to parse record file")
}

impl PredictArgs {
    pub fn record(&self) -> Result<StudentRecord> {
        if let Some(path) = &self.file {
            return read_record(path);
        }

        Ok(StudentRecord {
            age: required(self.age, "age")?,
            gender: required(self.gender.clone(), "gender")?,
            study_hours_per_day: required(self.study_hours_per_day, "study_hours_per_day")?,
            social_media_hours: required(self.social_media_hours, "social_media_hours")?,
            netflix_hours: required(self.netflix_hours, "netflix_hours")?,
            part_time_job: required(self.part_time_job.clone(), "part_time_job")?,
            attendance_percentage: required(self.attendance_percentage, "attendance_percentage")?,
            sleep_hours: required(self.sleep_hours, "sleep_hours")?,
            diet_quality: required(self.diet_quality.clone(), "diet_quality")?,
            exercise_frequency: required(self.exercise_frequency, "exercise_frequency")?,
            parental_education_level: required(
                self.parental_education_level.clone(),
                "parental_education_level",
            )?,
            internet_quality: required(self.internet_quality.clone(), "internet_quality")?,
            mental_health_rating: required(self.mental_health_rating, "mental_health_rating")?,
            extracurricular_participation: required(
                self.extracurricular_participation.clone(),
                "extracurricular_participation",
            )?,
        })
    }
}

/// Row for the submitted record table
#[derive(Tabled)]
pub(crate) struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// One table row per record column
pub(crate) fn record_rows(record: &StudentRecord) -> Vec<FieldRow> {
    let row = record.to_row();
    StudentRecord::COLUMNS
        .iter()
        .map(|column| FieldRow {
            field: column.to_string(),
            value: row.get(column).map(|c| c.to_string()).unwrap_or_default(),
        })
        .collect()
}

/// Submit a record to the server and print the predicted score
pub async fn predict(client: &ApiClient, args: &PredictArgs, format: OutputFormat) -> Result<()> {
    let record = args.record()?;
    if !args.no_validate {
        validation::validate(&record)?;
    }

    let result = client.predict(&record).await?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => {
            print_table(record_rows(&record));
            print_success(&format!(
                "Predicted exam score: {}",
                color_score(result.predicted_exam_score)
            ));
        }
    }

    Ok(())
}
