//! Prediction result types.
//!
//! Represents the output of the trained heart-disease classifier.

use serde::{Deserialize, Serialize};

/// Binary risk classification produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionResult {
    /// Classifier label 0
    LowRisk,
    /// Classifier label 1
    HighRisk,
}

impl PredictionResult {
    /// Map a classifier label to a result. Labels other than 0 and 1 have no
    /// meaning for this model.
    #[must_use]
    pub fn from_label(label: u8) -> Option<Self> {
        match label {
            0 => Some(Self::LowRisk),
            1 => Some(Self::HighRisk),
            _ => None,
        }
    }

    /// The raw classifier label.
    #[must_use]
    pub fn label(&self) -> u8 {
        match self {
            Self::LowRisk => 0,
            Self::HighRisk => 1,
        }
    }

    /// The fixed human-readable message shown for this result.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::LowRisk => {
                "Low Risk of Heart Disease. Maintain a healthy lifestyle and regular checkups."
            }
            Self::HighRisk => {
                "High Risk of Heart Disease. Please consult a cardiologist for further evaluation."
            }
        }
    }
}

impl std::fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LowRisk => write!(f, "LOW RISK"),
            Self::HighRisk => write!(f, "HIGH RISK"),
        }
    }
}

/// A completed screening: the classification plus when it was made.
///
/// Ephemeral and request-scoped; shown once in the result screen, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The binary risk classification
    pub result: PredictionResult,

    /// Timestamp of the screening
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Prediction {
    /// Create a new prediction stamped with the current time.
    #[must_use]
    pub fn new(result: PredictionResult) -> Self {
        Self {
            result,
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping() {
        assert_eq!(PredictionResult::from_label(0), Some(PredictionResult::LowRisk));
        assert_eq!(PredictionResult::from_label(1), Some(PredictionResult::HighRisk));
        assert_eq!(PredictionResult::from_label(2), None);

        assert_eq!(PredictionResult::LowRisk.label(), 0);
        assert_eq!(PredictionResult::HighRisk.label(), 1);
    }

    #[test]
    fn test_messages_are_fixed() {
        assert!(PredictionResult::HighRisk.message().starts_with("High Risk"));
        assert!(PredictionResult::LowRisk.message().starts_with("Low Risk"));
    }

    #[test]
    fn test_prediction_creation() {
        let prediction = Prediction::new(PredictionResult::HighRisk);
        assert_eq!(prediction.result, PredictionResult::HighRisk);
    }
}
