//! Ports layer: Trait definitions for the external trained artifacts.
//!
//! Following Hexagonal Architecture, these traits define the boundary between
//! the application and the artifacts produced by the training pipeline
//! (classifier and scaler). The artifacts are opaque: the application knows
//! their contracts, not their internals.

mod classifier;
mod scaler;

pub use classifier::Classifier;
pub use scaler::FeatureScaler;

/// Error type for scaler/classifier invocations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    /// The vector's width does not match what the artifact was trained on.
    /// Retrying cannot help: the serving-time schema has drifted from the
    /// training-time one.
    #[error("feature vector has width {actual}, artifact expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// The artifact could not produce a usable output (non-finite values,
    /// incompatible parameters, an unsupported label).
    #[error("artifact invocation failed: {0}")]
    Invocation(String),
}
