//! Artifact adapter: the trained model files exported by the training
//! pipeline.
//!
//! Three JSON artifacts make up a deployment, all keyed to the same column
//! order:
//! - `columns.json`: ordered array of the trained column names
//! - `scaler.json`: mean/scale parameters of the standard scaler
//! - `model.json`: the KNN classifier's reference set
//!
//! Every artifact is validated at load time, and [`ArtifactBundle::load`]
//! cross-checks that all three agree on the feature width. Loading is the only
//! I/O in the crate; a bundle that loads successfully serves read-only for the
//! rest of the process lifetime.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::SchemaColumns;
use crate::ports::{Classifier, FeatureScaler, InferenceError};

/// File name of the column-schema artifact.
pub const COLUMNS_FILE: &str = "columns.json";
/// File name of the scaler artifact.
pub const SCALER_FILE: &str = "scaler.json";
/// File name of the classifier artifact.
pub const MODEL_FILE: &str = "model.json";

/// Error type for artifact loading.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {kind} artifact: {reason}")]
    Invalid { kind: &'static str, reason: String },

    #[error(
        "artifact widths disagree: schema has {schema} columns, \
         scaler expects {scaler}, model expects {model}"
    )]
    WidthMismatch {
        schema: usize,
        scaler: usize,
        model: usize,
    },
}

impl ArtifactError {
    fn invalid(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            kind,
            reason: reason.into(),
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the column schema from `columns.json`.
///
/// # Errors
/// Returns error if the file is missing, not a JSON string array, or not a
/// valid schema (empty, duplicate, or empty names).
pub fn load_schema(path: &Path) -> Result<SchemaColumns, ArtifactError> {
    let names: Vec<String> = read_json(path)?;
    let schema = SchemaColumns::new(names)
        .map_err(|e| ArtifactError::invalid("columns", e.to_string()))?;

    tracing::info!("Loaded column schema from {:?} ({} columns)", path, schema.len());
    Ok(schema)
}

/// Parameters of the standard scaler, as serialized by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Standard (z-score) scaler: `(x - mean) / scale`, elementwise.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Build a scaler from exported parameters.
    ///
    /// # Errors
    /// Returns error if the parameter vectors are empty, of unequal length,
    /// non-finite, or contain a zero scale.
    pub fn new(params: ScalerParams) -> Result<Self, ArtifactError> {
        let ScalerParams { mean, scale } = params;

        if mean.is_empty() {
            return Err(ArtifactError::invalid("scaler", "mean is empty"));
        }
        if mean.len() != scale.len() {
            return Err(ArtifactError::invalid(
                "scaler",
                format!(
                    "mean has {} entries but scale has {}",
                    mean.len(),
                    scale.len()
                ),
            ));
        }
        if mean.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(ArtifactError::invalid(
                "scaler",
                "parameters contain non-finite values",
            ));
        }
        if scale.iter().any(|v| *v == 0.0) {
            return Err(ArtifactError::invalid("scaler", "scale contains zero"));
        }

        Ok(Self { mean, scale })
    }

    /// Load the scaler from `scaler.json`.
    ///
    /// # Errors
    /// Returns error if the file is missing, malformed, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let scaler = Self::new(read_json(path)?)?;
        tracing::info!(
            "Loaded scaler from {:?} ({} features)",
            path,
            scaler.n_features()
        );
        Ok(scaler)
    }
}

impl FeatureScaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if features.len() != self.mean.len() {
            return Err(InferenceError::ShapeMismatch {
                expected: self.mean.len(),
                actual: features.len(),
            });
        }

        let scaled: Vec<f64> = features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect();

        if scaled.iter().any(|v| !v.is_finite()) {
            return Err(InferenceError::Invocation(
                "scaling produced non-finite values".to_string(),
            ));
        }

        Ok(scaled)
    }
}

/// Parameters of the KNN classifier, as serialized by the training pipeline.
///
/// `points` are the stored reference samples in *scaled* space; `labels` are
/// their binary classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnParams {
    pub n_neighbors: usize,
    pub points: Vec<Vec<f64>>,
    pub labels: Vec<u8>,
}

/// K-nearest-neighbors binary classifier over a stored reference set.
#[derive(Debug, Clone)]
pub struct KnnModel {
    n_neighbors: usize,
    points: Vec<Vec<f64>>,
    labels: Vec<u8>,
}

impl KnnModel {
    /// Build a classifier from exported parameters.
    ///
    /// # Errors
    /// Returns error if the reference set is empty or ragged, labels are not
    /// binary or misaligned, coordinates are non-finite, or `n_neighbors` is
    /// out of range.
    pub fn new(params: KnnParams) -> Result<Self, ArtifactError> {
        let KnnParams {
            n_neighbors,
            points,
            labels,
        } = params;

        if points.is_empty() {
            return Err(ArtifactError::invalid("model", "reference set is empty"));
        }
        if points.len() != labels.len() {
            return Err(ArtifactError::invalid(
                "model",
                format!(
                    "{} reference points but {} labels",
                    points.len(),
                    labels.len()
                ),
            ));
        }

        let width = points[0].len();
        if width == 0 {
            return Err(ArtifactError::invalid(
                "model",
                "reference points have zero features",
            ));
        }
        for (i, point) in points.iter().enumerate() {
            if point.len() != width {
                return Err(ArtifactError::invalid(
                    "model",
                    format!(
                        "reference point {i} has {} features, expected {width}",
                        point.len()
                    ),
                ));
            }
            if point.iter().any(|v| !v.is_finite()) {
                return Err(ArtifactError::invalid(
                    "model",
                    format!("reference point {i} contains non-finite values"),
                ));
            }
        }

        if let Some(label) = labels.iter().find(|l| **l > 1) {
            return Err(ArtifactError::invalid(
                "model",
                format!("label {label} is not binary"),
            ));
        }
        if n_neighbors == 0 || n_neighbors > points.len() {
            return Err(ArtifactError::invalid(
                "model",
                format!(
                    "n_neighbors {n_neighbors} out of range [1, {}]",
                    points.len()
                ),
            ));
        }

        Ok(Self {
            n_neighbors,
            points,
            labels,
        })
    }

    /// Load the classifier from `model.json`.
    ///
    /// # Errors
    /// Returns error if the file is missing, malformed, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let model = Self::new(read_json(path)?)?;
        tracing::info!(
            "Loaded KNN model from {:?} (k={}, {} reference points, {} features)",
            path,
            model.n_neighbors,
            model.points.len(),
            model.n_features()
        );
        Ok(model)
    }
}

impl Classifier for KnnModel {
    fn n_features(&self) -> usize {
        self.points.first().map_or(0, Vec::len)
    }

    fn predict(&self, features: &[f64]) -> Result<u8, InferenceError> {
        let width = self.n_features();
        if features.len() != width {
            return Err(InferenceError::ShapeMismatch {
                expected: width,
                actual: features.len(),
            });
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(InferenceError::Invocation(
                "input contains non-finite values".to_string(),
            ));
        }

        // Squared Euclidean distance to every reference point; the square
        // root is monotonic and irrelevant for ranking.
        let mut distances: Vec<(f64, u8)> = self
            .points
            .iter()
            .zip(self.labels.iter())
            .map(|(point, label)| {
                let d = point
                    .iter()
                    .zip(features.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>();
                (d, *label)
            })
            .collect();
        distances.sort_by(|a, b| a.0.total_cmp(&b.0));

        let positive_votes = distances
            .iter()
            .take(self.n_neighbors)
            .filter(|(_, label)| *label == 1)
            .count();

        // Majority vote; a tie resolves to the smaller label.
        Ok(u8::from(positive_votes * 2 > self.n_neighbors))
    }
}

/// The three trained artifacts of a deployment, loaded and cross-checked.
///
/// Initialized once at startup; read-only afterwards.
#[derive(Debug)]
pub struct ArtifactBundle {
    schema: SchemaColumns,
    scaler: StandardScaler,
    model: KnnModel,
}

impl ArtifactBundle {
    /// Assemble a bundle, verifying that all artifacts agree on the feature
    /// width.
    ///
    /// # Errors
    /// Returns `ArtifactError::WidthMismatch` if the widths disagree.
    pub fn new(
        schema: SchemaColumns,
        scaler: StandardScaler,
        model: KnnModel,
    ) -> Result<Self, ArtifactError> {
        let (s, sc, m) = (schema.len(), scaler.n_features(), model.n_features());
        if s != sc || s != m {
            return Err(ArtifactError::WidthMismatch {
                schema: s,
                scaler: sc,
                model: m,
            });
        }

        Ok(Self {
            schema,
            scaler,
            model,
        })
    }

    /// Load all three artifacts from a directory.
    ///
    /// # Errors
    /// Returns error if any artifact is missing, malformed, fails its own
    /// validation, or the widths disagree.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let schema = load_schema(&dir.join(COLUMNS_FILE))?;
        let scaler = StandardScaler::load(&dir.join(SCALER_FILE))?;
        let model = KnnModel::load(&dir.join(MODEL_FILE))?;

        let bundle = Self::new(schema, scaler, model)?;
        tracing::info!(
            "Artifact bundle ready ({} features)",
            bundle.schema.len()
        );
        Ok(bundle)
    }

    #[must_use]
    pub fn schema(&self) -> &SchemaColumns {
        &self.schema
    }

    /// Split the bundle into its parts, for sharing behind `Arc`s.
    #[must_use]
    pub fn into_parts(self) -> (SchemaColumns, StandardScaler, KnnModel) {
        (self.schema, self.scaler, self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler(mean: &[f64], scale: &[f64]) -> StandardScaler {
        StandardScaler::new(ScalerParams {
            mean: mean.to_vec(),
            scale: scale.to_vec(),
        })
        .unwrap()
    }

    /// Two well-separated clusters around (0, 0) and (10, 10).
    fn cluster_model(k: usize) -> KnnModel {
        KnnModel::new(KnnParams {
            n_neighbors: k,
            points: vec![
                vec![0.0, 0.0],
                vec![0.5, 0.0],
                vec![0.0, 0.5],
                vec![10.0, 10.0],
                vec![10.5, 10.0],
                vec![10.0, 10.5],
            ],
            labels: vec![0, 0, 0, 1, 1, 1],
        })
        .unwrap()
    }

    #[test]
    fn test_scaler_transform() {
        let scaler = scaler(&[10.0, 100.0], &[2.0, 50.0]);
        let scaled = scaler.transform(&[12.0, 0.0]).unwrap();
        assert_eq!(scaled, vec![1.0, -2.0]);
    }

    #[test]
    fn test_scaler_shape_mismatch() {
        let scaler = scaler(&[0.0, 0.0], &[1.0, 1.0]);
        assert_eq!(
            scaler.transform(&[1.0]),
            Err(InferenceError::ShapeMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_scaler_rejects_non_finite_output() {
        let scaler = scaler(&[0.0], &[1e-300]);
        let result = scaler.transform(&[1e300]);
        assert!(matches!(result, Err(InferenceError::Invocation(_))));
    }

    #[test]
    fn test_scaler_validation() {
        assert!(StandardScaler::new(ScalerParams {
            mean: vec![],
            scale: vec![],
        })
        .is_err());

        assert!(StandardScaler::new(ScalerParams {
            mean: vec![1.0, 2.0],
            scale: vec![1.0],
        })
        .is_err());

        assert!(StandardScaler::new(ScalerParams {
            mean: vec![1.0],
            scale: vec![0.0],
        })
        .is_err());

        assert!(StandardScaler::new(ScalerParams {
            mean: vec![f64::NAN],
            scale: vec![1.0],
        })
        .is_err());
    }

    #[test]
    fn test_knn_predicts_nearest_cluster() {
        let model = cluster_model(3);
        assert_eq!(model.predict(&[0.2, 0.1]).unwrap(), 0);
        assert_eq!(model.predict(&[9.8, 10.2]).unwrap(), 1);
    }

    #[test]
    fn test_knn_majority_vote() {
        // k=5 reaches across both clusters from the midpoint's near side.
        let model = cluster_model(5);
        assert_eq!(model.predict(&[1.0, 1.0]).unwrap(), 0);
        assert_eq!(model.predict(&[9.0, 9.0]).unwrap(), 1);
    }

    #[test]
    fn test_knn_tie_resolves_to_low() {
        // k=6 covers the whole reference set: three votes each.
        let model = cluster_model(6);
        assert_eq!(model.predict(&[5.0, 5.0]).unwrap(), 0);
    }

    #[test]
    fn test_knn_shape_mismatch() {
        let model = cluster_model(3);
        assert_eq!(
            model.predict(&[1.0, 2.0, 3.0]),
            Err(InferenceError::ShapeMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_knn_rejects_non_finite_input() {
        let model = cluster_model(3);
        assert!(matches!(
            model.predict(&[f64::NAN, 0.0]),
            Err(InferenceError::Invocation(_))
        ));
    }

    #[test]
    fn test_knn_validation() {
        // empty reference set
        assert!(KnnModel::new(KnnParams {
            n_neighbors: 1,
            points: vec![],
            labels: vec![],
        })
        .is_err());

        // ragged points
        assert!(KnnModel::new(KnnParams {
            n_neighbors: 1,
            points: vec![vec![1.0, 2.0], vec![1.0]],
            labels: vec![0, 1],
        })
        .is_err());

        // misaligned labels
        assert!(KnnModel::new(KnnParams {
            n_neighbors: 1,
            points: vec![vec![1.0]],
            labels: vec![0, 1],
        })
        .is_err());

        // non-binary label
        assert!(KnnModel::new(KnnParams {
            n_neighbors: 1,
            points: vec![vec![1.0]],
            labels: vec![2],
        })
        .is_err());

        // k out of range
        assert!(KnnModel::new(KnnParams {
            n_neighbors: 0,
            points: vec![vec![1.0]],
            labels: vec![0],
        })
        .is_err());
        assert!(KnnModel::new(KnnParams {
            n_neighbors: 2,
            points: vec![vec![1.0]],
            labels: vec![0],
        })
        .is_err());
    }

    #[test]
    fn test_bundle_width_cross_check() {
        let schema =
            SchemaColumns::new(vec!["A".to_string(), "B".to_string()]).unwrap();
        let two_wide = scaler(&[0.0, 0.0], &[1.0, 1.0]);
        let model = cluster_model(3);

        assert!(ArtifactBundle::new(schema.clone(), two_wide.clone(), model.clone()).is_ok());

        let three_wide = scaler(&[0.0, 0.0, 0.0], &[1.0, 1.0, 1.0]);
        let err = ArtifactBundle::new(schema, three_wide, model).unwrap_err();
        assert!(matches!(err, ArtifactError::WidthMismatch { .. }));
    }

    #[test]
    fn test_params_json_shape() {
        let params: ScalerParams =
            serde_json::from_str(r#"{"mean": [1.0, 2.0], "scale": [0.5, 0.5]}"#).unwrap();
        assert_eq!(params.mean, vec![1.0, 2.0]);

        let params: KnnParams = serde_json::from_str(
            r#"{"n_neighbors": 1, "points": [[0.0, 1.0]], "labels": [1]}"#,
        )
        .unwrap();
        assert_eq!(params.n_neighbors, 1);

        let model = KnnModel::new(params).unwrap();
        assert_eq!(model.predict(&[0.0, 1.0]).unwrap(), 1);
    }
}
