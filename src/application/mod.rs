//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use case: screening a patient record for heart-disease risk.

mod inference;

pub use inference::InferenceService;
