//! Patient attribute types for heart-disease risk prediction.
//!
//! The eleven fields mirror the intake form of the trained model's dataset:
//! six numeric/binary measurements plus five categorical findings. Categorical
//! values parse from (and render back to) the exact strings the training-time
//! dataset used, since those strings become one-hot column names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error produced when an attribute lies outside its declared domain.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttributeError {
    #[error("{field}: value {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field}: unknown value {value:?}")]
    UnknownVariant { field: &'static str, value: String },
}

/// Patient sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// All variants, in form order.
    pub const ALL: &'static [Self] = &[Self::Male, Self::Female];

    /// Column-name prefix used for one-hot expansion.
    pub const ONE_HOT_PREFIX: &'static str = "Sex";

    /// Canonical string form, matching the training-time dataset.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl FromStr for Sex {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            other => Err(AttributeError::UnknownVariant {
                field: "sex",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chest pain classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChestPainType {
    /// Atypical angina
    AtypicalAngina,
    /// Non-anginal pain
    NonAnginal,
    /// Typical angina
    TypicalAngina,
    /// Asymptomatic
    Asymptomatic,
}

impl ChestPainType {
    pub const ALL: &'static [Self] = &[
        Self::AtypicalAngina,
        Self::NonAnginal,
        Self::TypicalAngina,
        Self::Asymptomatic,
    ];

    pub const ONE_HOT_PREFIX: &'static str = "ChestPainType";

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AtypicalAngina => "ATA",
            Self::NonAnginal => "NAP",
            Self::TypicalAngina => "TA",
            Self::Asymptomatic => "ASY",
        }
    }
}

impl FromStr for ChestPainType {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ATA" => Ok(Self::AtypicalAngina),
            "NAP" => Ok(Self::NonAnginal),
            "TA" => Ok(Self::TypicalAngina),
            "ASY" => Ok(Self::Asymptomatic),
            other => Err(AttributeError::UnknownVariant {
                field: "chest_pain_type",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ChestPainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resting electrocardiogram finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestingEcg {
    Normal,
    /// ST-T wave abnormality
    StAbnormality,
    /// Left ventricular hypertrophy
    LvHypertrophy,
}

impl RestingEcg {
    pub const ALL: &'static [Self] = &[Self::Normal, Self::StAbnormality, Self::LvHypertrophy];

    pub const ONE_HOT_PREFIX: &'static str = "RestingECG";

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::StAbnormality => "ST",
            Self::LvHypertrophy => "LVH",
        }
    }
}

impl FromStr for RestingEcg {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Normal" => Ok(Self::Normal),
            "ST" => Ok(Self::StAbnormality),
            "LVH" => Ok(Self::LvHypertrophy),
            other => Err(AttributeError::UnknownVariant {
                field: "resting_ecg",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for RestingEcg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exercise-induced angina.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseAngina {
    Yes,
    No,
}

impl ExerciseAngina {
    pub const ALL: &'static [Self] = &[Self::Yes, Self::No];

    pub const ONE_HOT_PREFIX: &'static str = "ExerciseAngina";

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Y",
            Self::No => "N",
        }
    }
}

impl FromStr for ExerciseAngina {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Y" => Ok(Self::Yes),
            "N" => Ok(Self::No),
            other => Err(AttributeError::UnknownVariant {
                field: "exercise_angina",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExerciseAngina {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slope of the peak-exercise ST segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StSlope {
    Up,
    Flat,
    Down,
}

impl StSlope {
    pub const ALL: &'static [Self] = &[Self::Up, Self::Flat, Self::Down];

    pub const ONE_HOT_PREFIX: &'static str = "ST_Slope";

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Flat => "Flat",
            Self::Down => "Down",
        }
    }
}

impl FromStr for StSlope {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Up" => Ok(Self::Up),
            "Flat" => Ok(Self::Flat),
            "Down" => Ok(Self::Down),
            other => Err(AttributeError::UnknownVariant {
                field: "st_slope",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for StSlope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric field domains, shared by validation and the intake form.
pub mod ranges {
    /// Age in years
    pub const AGE: (f64, f64) = (18.0, 100.0);
    /// Resting blood pressure in mm Hg
    pub const RESTING_BP: (f64, f64) = (80.0, 200.0);
    /// Serum cholesterol in mg/dL
    pub const CHOLESTEROL: (f64, f64) = (100.0, 600.0);
    /// Maximum heart rate achieved
    pub const MAX_HR: (f64, f64) = (60.0, 220.0);
    /// ST depression induced by exercise
    pub const OLDPEAK: (f64, f64) = (0.0, 6.0);
}

/// A complete patient attribute record, as entered in the intake form.
///
/// Every field is mandatory. `validate()` must pass before the record is
/// encoded into a feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientAttributes {
    /// Age in years (18-100)
    pub age: u32,

    /// Patient sex
    pub sex: Sex,

    /// Chest pain type
    pub chest_pain_type: ChestPainType,

    /// Resting blood pressure in mm Hg (80-200)
    pub resting_bp: u32,

    /// Serum cholesterol in mg/dL (100-600)
    pub cholesterol: u32,

    /// Fasting blood sugar above 120 mg/dL
    pub fasting_bs: bool,

    /// Resting ECG finding
    pub resting_ecg: RestingEcg,

    /// Maximum heart rate achieved (60-220)
    pub max_hr: u32,

    /// Exercise-induced angina
    pub exercise_angina: ExerciseAngina,

    /// Oldpeak: ST depression induced by exercise (0.0-6.0)
    pub oldpeak: f64,

    /// Slope of the peak-exercise ST segment
    pub st_slope: StSlope,
}

impl PatientAttributes {
    /// Validate that every numeric field is within its declared domain.
    ///
    /// # Errors
    /// Returns all out-of-range fields, not just the first.
    pub fn validate(&self) -> Result<(), Vec<AttributeError>> {
        let mut errors = Vec::new();

        let mut check = |field: &'static str, value: f64, (min, max): (f64, f64)| {
            if !value.is_finite() || value < min || value > max {
                errors.push(AttributeError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        };

        check("age", f64::from(self.age), ranges::AGE);
        check("resting_bp", f64::from(self.resting_bp), ranges::RESTING_BP);
        check(
            "cholesterol",
            f64::from(self.cholesterol),
            ranges::CHOLESTEROL,
        );
        check("max_hr", f64::from(self.max_hr), ranges::MAX_HR);
        check("oldpeak", self.oldpeak, ranges::OLDPEAK);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The synthesized one-hot column names selected by this record,
    /// one per categorical field (e.g. `Sex_M`, `ST_Slope_Up`).
    #[must_use]
    pub fn one_hot_keys(&self) -> [String; 5] {
        [
            format!("{}_{}", Sex::ONE_HOT_PREFIX, self.sex),
            format!("{}_{}", ChestPainType::ONE_HOT_PREFIX, self.chest_pain_type),
            format!("{}_{}", RestingEcg::ONE_HOT_PREFIX, self.resting_ecg),
            format!("{}_{}", ExerciseAngina::ONE_HOT_PREFIX, self.exercise_angina),
            format!("{}_{}", StSlope::ONE_HOT_PREFIX, self.st_slope),
        ]
    }
}
