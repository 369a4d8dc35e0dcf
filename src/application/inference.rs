//! Inference service: Orchestrates the prediction pipeline.
//!
//! This service coordinates:
//! - Attribute validation and feature encoding
//! - The external scaling transform
//! - The external trained classifier
//! - Mapping of the binary label to a presentation-ready result

use std::sync::Arc;

use crate::domain::{self, PatientAttributes, Prediction, PredictionResult, SchemaColumns};
use crate::ports::{Classifier, FeatureScaler, InferenceError};
use crate::CardioscreenError;

/// Service for running risk predictions over the loaded artifacts.
///
/// The artifacts are shared read-only; the service holds no mutable state and
/// every call is a pure function of its inputs. Each prediction allocates its
/// own feature vector and result.
pub struct InferenceService<C, S>
where
    C: Classifier,
    S: FeatureScaler,
{
    classifier: Arc<C>,
    scaler: Arc<S>,
    schema: Arc<SchemaColumns>,
}

impl<C, S> InferenceService<C, S>
where
    C: Classifier,
    S: FeatureScaler,
{
    /// Create a new inference service.
    pub fn new(classifier: Arc<C>, scaler: Arc<S>, schema: Arc<SchemaColumns>) -> Self {
        Self {
            classifier,
            scaler,
            schema,
        }
    }

    /// The column schema the service encodes against.
    #[must_use]
    pub fn schema(&self) -> &SchemaColumns {
        &self.schema
    }

    /// Run the full prediction pipeline for one patient record.
    ///
    /// Steps:
    /// 1. Validate and encode the attributes against the column schema
    /// 2. Apply the scaling transform
    /// 3. Apply the classifier and map its label
    ///
    /// # Errors
    /// Returns `InvalidAttribute` for out-of-domain input (recoverable, the
    /// caller should prompt for correction) and `Inference` for schema drift
    /// or artifact failures (not retryable). Never falls back to a default
    /// prediction.
    pub fn predict(&self, attrs: &PatientAttributes) -> Result<Prediction, CardioscreenError> {
        tracing::debug!("Step 1: Encoding patient attributes...");
        let vector = domain::encode(attrs, &self.schema)?;

        tracing::debug!("Step 2: Applying scaling transform ({} features)...", vector.len());
        let scaled = self.scaler.transform(vector.values())?;

        tracing::debug!("Step 3: Applying classifier...");
        let label = self.classifier.predict(&scaled)?;
        let result = PredictionResult::from_label(label).ok_or_else(|| {
            InferenceError::Invocation(format!("classifier returned unsupported label {label}"))
        })?;

        tracing::info!("Prediction complete: label={}, result={}", label, result);
        Ok(Prediction::new(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::artifact::{KnnModel, KnnParams, ScalerParams, StandardScaler};
    use crate::domain::{
        ChestPainType, ExerciseAngina, RestingEcg, SchemaColumns, Sex, StSlope,
    };

    fn attrs() -> PatientAttributes {
        PatientAttributes {
            age: 40,
            sex: Sex::Male,
            chest_pain_type: ChestPainType::Asymptomatic,
            resting_bp: 120,
            cholesterol: 200,
            fasting_bs: false,
            resting_ecg: RestingEcg::Normal,
            max_hr: 150,
            exercise_angina: ExerciseAngina::No,
            oldpeak: 1.0,
            st_slope: StSlope::Up,
        }
    }

    /// Minimal two-column deployment: Age and MaxHR only. The reference set
    /// separates young/high-HR (label 0) from old/low-HR (label 1) in scaled
    /// space.
    fn service() -> InferenceService<KnnModel, StandardScaler> {
        let schema =
            SchemaColumns::new(vec!["Age".to_string(), "MaxHR".to_string()]).unwrap();
        let scaler = StandardScaler::new(ScalerParams {
            mean: vec![53.0, 136.0],
            scale: vec![9.0, 25.0],
        })
        .unwrap();
        let model = KnnModel::new(KnnParams {
            n_neighbors: 3,
            points: vec![
                vec![-1.2, 1.0],
                vec![-0.9, 0.7],
                vec![-1.0, 1.2],
                vec![1.1, -0.9],
                vec![0.8, -1.1],
                vec![1.3, -0.8],
            ],
            labels: vec![0, 0, 0, 1, 1, 1],
        })
        .unwrap();

        InferenceService::new(Arc::new(model), Arc::new(scaler), Arc::new(schema))
    }

    #[test]
    fn test_low_risk_prediction() {
        // age 40, max_hr 150 scales to roughly (-1.4, 0.6): the label-0 cluster.
        let prediction = service().predict(&attrs()).unwrap();
        assert_eq!(prediction.result, PredictionResult::LowRisk);
    }

    #[test]
    fn test_high_risk_prediction() {
        let mut high = attrs();
        high.age = 65;
        high.max_hr = 105;

        let prediction = service().predict(&high).unwrap();
        assert_eq!(prediction.result, PredictionResult::HighRisk);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let service = service();
        let first = service.predict(&attrs()).unwrap();
        let second = service.predict(&attrs()).unwrap();
        assert_eq!(first.result, second.result);
    }

    #[test]
    fn test_invalid_attributes_rejected() {
        let mut invalid = attrs();
        invalid.age = 17;

        let err = service().predict(&invalid).unwrap_err();
        assert!(matches!(err, CardioscreenError::InvalidAttribute(_)));
    }

    #[test]
    fn test_schema_drift_surfaces_shape_mismatch() {
        // Schema is three columns wide, but the scaler and model expect two:
        // the encoded vector no longer fits the artifacts.
        let drifted = SchemaColumns::new(vec![
            "Age".to_string(),
            "MaxHR".to_string(),
            "Oldpeak".to_string(),
        ])
        .unwrap();

        let base = service();
        let service = InferenceService::new(
            Arc::clone(&base.classifier),
            Arc::clone(&base.scaler),
            Arc::new(drifted),
        );

        let err = service.predict(&attrs()).unwrap_err();
        assert!(matches!(
            err,
            CardioscreenError::Inference(InferenceError::ShapeMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }
}
