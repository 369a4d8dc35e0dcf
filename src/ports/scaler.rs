//! Scaler port: Trait for the trained normalization artifact.

use super::InferenceError;

/// Trait for the feature-scaling transform.
///
/// Implementations wrap the serialized scaler artifact produced by the
/// training pipeline. The transform operates over the same column order as
/// the column schema, and is an opaque numeric normalization as far as the
/// application is concerned.
pub trait FeatureScaler: Send + Sync {
    /// The feature-vector width the scaler was fitted on.
    fn n_features(&self) -> usize;

    /// Normalize a raw feature vector.
    ///
    /// # Errors
    /// Returns `InferenceError::ShapeMismatch` if `features` does not have
    /// `n_features` entries, or `InferenceError::Invocation` if the transform
    /// produces non-finite values.
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError>;
}
