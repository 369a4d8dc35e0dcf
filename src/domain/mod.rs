//! Domain layer: Core types and the feature encoder.
//!
//! This module contains pure Rust types with no I/O. All types are
//! serializable and validated at construction or before use.

mod encoder;
mod patient;
mod prediction;
mod schema;

pub use encoder::{encode, FeatureVector};
pub use patient::{
    ranges, AttributeError, ChestPainType, ExerciseAngina, PatientAttributes, RestingEcg, Sex,
    StSlope,
};
pub use prediction::{Prediction, PredictionResult};
pub use schema::{SchemaColumns, SchemaError};
