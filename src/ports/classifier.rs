//! Classifier port: Trait for the trained binary classifier artifact.

use super::InferenceError;

/// Trait for the trained classifier.
///
/// Implementations wrap a serialized model artifact and expose its single
/// operation: predicting a binary label from an already-scaled feature vector.
///
/// Implementations must be pure: the same input always produces the same
/// label, with no internal state mutation.
pub trait Classifier: Send + Sync {
    /// The feature-vector width the model was trained on.
    fn n_features(&self) -> usize;

    /// Predict a binary label (0 or 1) for a scaled feature vector.
    ///
    /// # Errors
    /// Returns `InferenceError::ShapeMismatch` if `features` does not have
    /// `n_features` entries, or `InferenceError::Invocation` if the input
    /// contains non-finite values.
    fn predict(&self, features: &[f64]) -> Result<u8, InferenceError>;
}
