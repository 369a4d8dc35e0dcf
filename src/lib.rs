//! # Cardioscreen
//!
//! Terminal heart-disease risk screening backed by a previously trained
//! KNN classifier.
//!
//! This crate provides:
//! - Encoding of patient medical attributes into the feature vector the
//!   trained model expects (one-hot expansion for categorical fields)
//! - Loading of the trained artifacts (column schema, scaler, model) as JSON
//! - A terminal UI collecting the attributes and rendering the prediction
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (PatientAttributes, SchemaColumns, the encoder)
//! - `ports`: Trait definitions for the external trained artifacts
//! - `adapters`: Concrete artifact implementations (JSON scaler/KNN model)
//! - `application`: The inference pipeline orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{PatientAttributes, Prediction, PredictionResult};

/// Result type for Cardioscreen operations
pub type Result<T> = std::result::Result<T, CardioscreenError>;

/// Main error type for Cardioscreen
#[derive(Debug, thiserror::Error)]
pub enum CardioscreenError {
    #[error("Artifact load failed: {0}")]
    ArtifactLoad(#[from] adapters::ArtifactError),

    #[error("Invalid patient attributes: {0}")]
    InvalidAttribute(String),

    #[error("Inference failed: {0}")]
    Inference(#[from] ports::InferenceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Vec<domain::AttributeError>> for CardioscreenError {
    fn from(errors: Vec<domain::AttributeError>) -> Self {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self::InvalidAttribute(joined)
    }
}
