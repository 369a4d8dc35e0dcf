//! Feature encoding: patient attributes to the model's feature vector.
//!
//! The trained artifacts operate on a fixed-width numeric vector whose column
//! order is dictated by [`SchemaColumns`]. Encoding is two-phase:
//!
//! 1. **Sparse assemble**: seed a keyed map with the six numeric fields under
//!    their training-time column names, then set one synthesized one-hot key
//!    per categorical field to 1.
//! 2. **Dense project**: materialize the vector by iterating the schema in
//!    order, taking the sparse value where present and 0 elsewhere.
//!
//! The projection discards sparse keys the schema does not know. For a
//! drop-first-encoded schema this is the normal reference-category case; for
//! anything else it means the serving-time enum saw a value the training run
//! never produced a column for, and the signal silently degrades to the
//! all-zero encoding.

use std::collections::HashMap;

use super::patient::{AttributeError, PatientAttributes};
use super::schema::SchemaColumns;

/// A numeric feature vector aligned to a schema's column order.
///
/// Constructed fresh per prediction by [`encode`]; its length always equals
/// the schema length it was projected against.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Values in schema order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Vector width.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Encode a patient record into a feature vector aligned to `schema`.
///
/// # Errors
/// Returns every out-of-domain attribute if validation fails; nothing is
/// encoded in that case.
pub fn encode(
    attrs: &PatientAttributes,
    schema: &SchemaColumns,
) -> Result<FeatureVector, Vec<AttributeError>> {
    attrs.validate()?;

    // Phase 1: sparse assemble. Numeric fields keep their literal column
    // names; each categorical field contributes a single `<prefix>_<value>`
    // key set to 1.
    let mut sparse: HashMap<String, f64> = HashMap::with_capacity(11);
    sparse.insert("Age".to_string(), f64::from(attrs.age));
    sparse.insert("RestingBP".to_string(), f64::from(attrs.resting_bp));
    sparse.insert("Cholesterol".to_string(), f64::from(attrs.cholesterol));
    sparse.insert("FastingBS".to_string(), f64::from(u8::from(attrs.fasting_bs)));
    sparse.insert("MaxHR".to_string(), f64::from(attrs.max_hr));
    sparse.insert("Oldpeak".to_string(), attrs.oldpeak);

    for key in attrs.one_hot_keys() {
        if !schema.contains(&key) {
            // Reference category under drop-first encoding, or genuine
            // training/serving skew. Either way the column family stays
            // all-zero for this field.
            tracing::debug!("one-hot key {key:?} not present in trained schema");
        }
        sparse.insert(key, 1.0);
    }

    // Phase 2: dense project by the authoritative column order. Sparse keys
    // absent from the schema are dropped here, so the width is always the
    // schema width.
    let values = schema
        .names()
        .iter()
        .map(|name| sparse.get(name.as_str()).copied().unwrap_or(0.0))
        .collect();

    Ok(FeatureVector { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patient::{
        ChestPainType, ExerciseAngina, RestingEcg, Sex, StSlope,
    };

    fn sample() -> PatientAttributes {
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

    fn schema(names: &[&str]) -> SchemaColumns {
        SchemaColumns::new(names.iter().map(|s| (*s).to_string()).collect()).unwrap()
    }

    /// Full trained schema shape: the six numeric columns plus a mix of
    /// one-hot columns including some this record does not select.
    fn reference_schema() -> SchemaColumns {
        schema(&[
            "Age",
            "RestingBP",
            "Cholesterol",
            "FastingBS",
            "MaxHR",
            "Oldpeak",
            "Sex_M",
            "Sex_F",
            "ChestPainType_ATA",
            "ChestPainType_ASY",
            "RestingECG_Normal",
            "ExerciseAngina_Y",
            "ST_Slope_Up",
        ])
    }

    #[test]
    fn test_width_equals_schema_len() {
        let vector = encode(&sample(), &reference_schema()).unwrap();
        assert_eq!(vector.len(), reference_schema().len());
    }

    #[test]
    fn test_reference_scenario() {
        let vector = encode(&sample(), &reference_schema()).unwrap();
        assert_eq!(
            vector.values(),
            &[40.0, 120.0, 200.0, 0.0, 150.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_deterministic() {
        let a = encode(&sample(), &reference_schema()).unwrap();
        let b = encode(&sample(), &reference_schema()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_one_hot_exclusive_within_field() {
        let all_sex = schema(&["Sex_M", "Sex_F"]);

        let mut attrs = sample();
        attrs.sex = Sex::Male;
        let vector = encode(&attrs, &all_sex).unwrap();
        assert_eq!(vector.values(), &[1.0, 0.0]);

        attrs.sex = Sex::Female;
        let vector = encode(&attrs, &all_sex).unwrap();
        assert_eq!(vector.values(), &[0.0, 1.0]);
    }

    #[test]
    fn test_absent_one_hot_key_degrades_to_zero() {
        // Schema knows only two chest-pain columns; the record selects a third.
        let narrow = schema(&["Age", "ChestPainType_ATA", "ChestPainType_NAP"]);

        let mut attrs = sample();
        attrs.chest_pain_type = ChestPainType::TypicalAngina;

        let vector = encode(&attrs, &narrow).expect("absent key must not fail");
        assert_eq!(vector.values(), &[40.0, 0.0, 0.0]);
    }

    #[test]
    fn test_extra_sparse_keys_discarded() {
        // Schema narrower than the assembled map: output is still schema-width.
        let narrow = schema(&["Oldpeak", "Age"]);
        let vector = encode(&sample(), &narrow).unwrap();
        assert_eq!(vector.values(), &[1.0, 40.0]);
    }

    #[test]
    fn test_fasting_bs_encodes_as_binary() {
        let narrow = schema(&["FastingBS"]);

        let mut attrs = sample();
        attrs.fasting_bs = true;
        assert_eq!(encode(&attrs, &narrow).unwrap().values(), &[1.0]);

        attrs.fasting_bs = false;
        assert_eq!(encode(&attrs, &narrow).unwrap().values(), &[0.0]);
    }

    #[test]
    fn test_invalid_attributes_rejected_before_encoding() {
        let mut attrs = sample();
        attrs.age = 101;

        let errors = encode(&attrs, &reference_schema()).expect_err("out of range");
        assert_eq!(errors.len(), 1);
    }
}
