//! Categorical field validation
//!
//! Each categorical attribute of a [`StudentRecord`] has a fixed, case-sensitive
//! set of accepted values. The sets are compiled in and not configurable.

use crate::error::PredictError;
use crate::models::StudentRecord;

/// Categorical fields of a student record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    Gender,
    PartTimeJob,
    DietQuality,
    InternetQuality,
    ExtracurricularParticipation,
    ParentalEducationLevel,
}

impl CategoricalField {
    /// All categorical fields, in validation order
    pub const ALL: [CategoricalField; 6] = [
        CategoricalField::Gender,
        CategoricalField::PartTimeJob,
        CategoricalField::DietQuality,
        CategoricalField::InternetQuality,
        CategoricalField::ExtracurricularParticipation,
        CategoricalField::ParentalEducationLevel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CategoricalField::Gender => "gender",
            CategoricalField::PartTimeJob => "part_time_job",
            CategoricalField::DietQuality => "diet_quality",
            CategoricalField::InternetQuality => "internet_quality",
            CategoricalField::ExtracurricularParticipation => "extracurricular_participation",
            CategoricalField::ParentalEducationLevel => "parental_education_level",
        }
    }

    pub fn allowed(self) -> &'static [&'static str] {
        match self {
            CategoricalField::Gender => &["Male", "Female", "Other"],
            CategoricalField::PartTimeJob => &["Yes", "No"],
            CategoricalField::DietQuality => &["Poor", "Fair", "Good"],
            CategoricalField::InternetQuality => &["Poor", "Average", "Good"],
            CategoricalField::ExtracurricularParticipation => &["Yes", "No"],
            CategoricalField::ParentalEducationLevel => {
                &["High School", "Bachelor", "Master", "no_education"]
            }
        }
    }

    /// Read this field's value from a record
    pub fn value_of(self, record: &StudentRecord) -> &str {
        match self {
            CategoricalField::Gender => &record.gender,
            CategoricalField::PartTimeJob => &record.part_time_job,
            CategoricalField::DietQuality => &record.diet_quality,
            CategoricalField::InternetQuality => &record.internet_quality,
            CategoricalField::ExtracurricularParticipation => {
                &record.extracurricular_participation
            }
            CategoricalField::ParentalEducationLevel => &record.parental_education_level,
        }
    }

    pub fn accepts(self, value: &str) -> bool {
        self.allowed().contains(&value)
    }
}

/// Check every categorical field; the first offending field is reported
pub fn validate(record: &StudentRecord) -> Result<(), PredictError> {
    for field in CategoricalField::ALL {
        if !field.accepts(field.value_of(record)) {
            return Err(PredictError::Validation {
                field: field.name(),
                allowed: field.allowed(),
            });
        }
    }
    Ok(())
}
