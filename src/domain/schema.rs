//! The trained model's column schema.
//!
//! `SchemaColumns` is the single source of truth for feature-vector width and
//! column order. It is loaded once from the `columns.json` artifact and never
//! mutated afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Error produced when a column list cannot form a valid schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("schema contains no columns")]
    Empty,

    #[error("schema contains an empty column name at position {0}")]
    EmptyName(usize),

    #[error("schema contains duplicate column {0:?}")]
    Duplicate(String),
}

/// The ordered, distinct column names the trained artifacts require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SchemaColumns {
    names: Vec<String>,
}

impl SchemaColumns {
    /// Build a schema from an ordered column-name list.
    ///
    /// # Errors
    /// Returns `SchemaError` if the list is empty, contains an empty name,
    /// or contains duplicates.
    pub fn new(names: Vec<String>) -> Result<Self, SchemaError> {
        if names.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(SchemaError::EmptyName(i));
            }
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::Duplicate(name.clone()));
            }
        }

        Ok(Self { names })
    }

    /// Number of columns, and therefore the feature-vector width.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column names in schema order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a column, if present.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Whether the schema contains the column.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
}

impl TryFrom<Vec<String>> for SchemaColumns {
    type Error = SchemaError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<SchemaColumns> for Vec<String> {
    fn from(schema: SchemaColumns) -> Self {
        schema.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_valid_schema() {
        let schema = SchemaColumns::new(columns(&["Age", "Sex_M", "Oldpeak"])).unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.position("Sex_M"), Some(1));
        assert!(schema.contains("Oldpeak"));
        assert!(!schema.contains("Sex_F"));
    }

    #[test]
    fn test_empty_schema_rejected() {
        assert_eq!(SchemaColumns::new(Vec::new()), Err(SchemaError::Empty));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(
            SchemaColumns::new(columns(&["Age", ""])),
            Err(SchemaError::EmptyName(1))
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        assert_eq!(
            SchemaColumns::new(columns(&["Age", "Age"])),
            Err(SchemaError::Duplicate("Age".to_string()))
        );
    }

    #[test]
    fn test_order_preserved() {
        let names = columns(&["Oldpeak", "Age", "MaxHR"]);
        let schema = SchemaColumns::new(names.clone()).unwrap();
        assert_eq!(schema.names(), names.as_slice());
    }

    #[test]
    fn test_json_roundtrip() {
        let schema = SchemaColumns::new(columns(&["Age", "Sex_M"])).unwrap();
        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(json, r#"["Age","Sex_M"]"#);

        let back: SchemaColumns = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schema);

        // Deserialization runs the same validation as the constructor.
        assert!(serde_json::from_str::<SchemaColumns>(r#"["Age","Age"]"#).is_err());
    }
}
