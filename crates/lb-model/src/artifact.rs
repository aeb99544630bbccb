//! Model artifact document types and semantic validation.
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "model_version": "1.0",
//!   "trained_on": "2025-07-08",
//!   "features": [
//!     {"kind": "numeric", "name": "Pclass", "field": "passenger_class"},
//!     {"kind": "indicator", "name": "Sex_male", "field": "sex", "value": "male"}
//!   ],
//!   "categories": {"sex": ["female", "male"]},
//!   "preprocessing": {"median_age": 28.0, "default_embarked": "S"},
//!   "classifier": {"type": "logistic_regression", "coefficients": [-0.9, -2.6], "intercept": 3.1}
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use lb_core::enums::{Port, Sex, Title};
use lb_core::form::DEFAULT_AGE;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::schema;

/// The only artifact format this build understands.
pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub model_version: String,
    pub trained_on: NaiveDate,
    /// Ordered feature list; defines the feature vector layout.
    pub features: Vec<FeatureSpec>,
    #[serde(default)]
    pub categories: Categories,
    #[serde(default)]
    pub preprocessing: Preprocessing,
    pub classifier: ClassifierSpec,
}

/// One column of the feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureSpec {
    /// Numeric passenger field passed through as-is.
    Numeric { name: String, field: NumericField },
    /// `1.0` when the categorical field equals `value`, else `0.0`.
    Indicator {
        name: String,
        field: CategoricalField,
        value: String,
    },
}

impl FeatureSpec {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Numeric { name, .. } | Self::Indicator { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    PassengerClass,
    Age,
    SiblingsSpouses,
    ParentsChildren,
    Fare,
    /// `1.0` with a recorded cabin, else `0.0`.
    HasCabin,
    FamilySize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    Sex,
    Embarked,
    Title,
}

impl CategoricalField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sex => "sex",
            Self::Embarked => "embarked",
            Self::Title => "title",
        }
    }

    /// Whether `value` names a variant of this field at all.
    #[must_use]
    pub fn is_known_value(self, value: &str) -> bool {
        match self {
            Self::Sex => [Sex::Male, Sex::Female].iter().any(|v| v.as_str() == value),
            Self::Embarked => [Port::Cherbourg, Port::Queenstown, Port::Southampton]
                .iter()
                .any(|v| v.as_str() == value),
            Self::Title => [Title::Mr, Title::Miss, Title::Mrs, Title::Other]
                .iter()
                .any(|v| v.as_str() == value),
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories seen at training time. An empty list leaves the field
/// unconstrained; a field used by an indicator feature must list its values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Categories {
    #[serde(default)]
    pub sex: Vec<String>,
    #[serde(default)]
    pub embarked: Vec<String>,
    #[serde(default)]
    pub title: Vec<String>,
}

impl Categories {
    #[must_use]
    pub fn for_field(&self, field: CategoricalField) -> &[String] {
        match field {
            CategoricalField::Sex => &self.sex,
            CategoricalField::Embarked => &self.embarked,
            CategoricalField::Title => &self.title,
        }
    }
}

/// Imputation defaults applied before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Preprocessing {
    /// Replaces an age entered as 0.
    #[serde(default = "default_median_age")]
    pub median_age: f64,
    /// Port used when none is given.
    #[serde(default = "default_embarked")]
    pub default_embarked: Port,
}

const fn default_median_age() -> f64 {
    DEFAULT_AGE
}

const fn default_embarked() -> Port {
    Port::Southampton
}

impl Default for Preprocessing {
    fn default() -> Self {
        Self {
            median_age: default_median_age(),
            default_embarked: default_embarked(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierSpec {
    /// `P(survived) = sigmoid(coefficients · x + intercept)`.
    LogisticRegression { coefficients: Vec<f64>, intercept: f64 },
    /// Mean of per-tree class-1 leaf fractions.
    RandomForest { trees: Vec<TreeSpec> },
}

impl ClassifierSpec {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::LogisticRegression { .. } => "logistic_regression",
            Self::RandomForest { .. } => "random_forest",
        }
    }
}

/// Flattened decision tree. Node 0 is the root and children always come
/// after their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NodeSpec {
    /// Go to `left` when `x[feature] <= threshold`, else `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Training sample counts `[not_survived, survived]` at this leaf.
    Leaf { counts: [f64; 2] },
}

impl ModelArtifact {
    /// Read, schema-check, and validate an artifact file.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] describing the first stage that failed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::Missing {
                    path: path.to_path_buf(),
                }
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let document: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|source| LoadError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_value(document)
    }

    /// Schema-check and validate an already parsed artifact document.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] for version, schema, or semantic failures.
    pub fn from_value(document: serde_json::Value) -> Result<Self, LoadError> {
        check_format_version(&document)?;
        schema::validate_artifact(&document)?;

        let artifact: Self = serde_json::from_value(document)
            .map_err(|error| LoadError::Invalid(error.to_string()))?;
        artifact.validate()?;

        tracing::debug!(
            model_version = %artifact.model_version,
            classifier = artifact.classifier.kind(),
            features = artifact.features.len(),
            "model artifact validated"
        );
        Ok(artifact)
    }

    /// Semantic checks the JSON Schema cannot express.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Invalid` naming the first inconsistency.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(LoadError::IncompatibleVersion {
                found: self.format_version.to_string(),
                supported: SUPPORTED_FORMAT_VERSION,
            });
        }
        if self.features.is_empty() {
            return Err(invalid("feature list is empty"));
        }

        let mut seen = HashSet::new();
        for feature in &self.features {
            if !seen.insert(feature.name()) {
                return Err(invalid(format!("duplicate feature '{}'", feature.name())));
            }
        }

        self.validate_categories()?;
        self.validate_preprocessing()?;
        self.validate_classifier()
    }

    /// `"1.0 (trained on 2025-07-08)"`
    #[must_use]
    pub fn display_version(&self) -> String {
        format!("{} (trained on {})", self.model_version, self.trained_on)
    }

    fn validate_categories(&self) -> Result<(), LoadError> {
        for field in [
            CategoricalField::Sex,
            CategoricalField::Embarked,
            CategoricalField::Title,
        ] {
            if let Some(bad) = self
                .categories
                .for_field(field)
                .iter()
                .find(|value| !field.is_known_value(value))
            {
                return Err(invalid(format!("unknown {field} category '{bad}'")));
            }
        }

        for feature in &self.features {
            if let FeatureSpec::Indicator { name, field, value } = feature {
                let declared = self.categories.for_field(*field);
                if declared.is_empty() {
                    return Err(invalid(format!(
                        "feature '{name}' uses {field} but no {field} categories are declared"
                    )));
                }
                if !declared.contains(value) {
                    return Err(invalid(format!(
                        "feature '{name}' tests {field} = '{value}', which is not a declared category"
                    )));
                }
            }
        }
        Ok(())
    }

    fn validate_preprocessing(&self) -> Result<(), LoadError> {
        let median_age = self.preprocessing.median_age;
        if !(0.0..=100.0).contains(&median_age) {
            return Err(invalid(format!(
                "median_age {median_age} must be in [0, 100]"
            )));
        }
        let embarked = &self.categories.embarked;
        let default_port = self.preprocessing.default_embarked.as_str();
        if !embarked.is_empty() && !embarked.iter().any(|port| port == default_port) {
            return Err(invalid(format!(
                "default_embarked '{default_port}' is not a declared embarked category"
            )));
        }
        Ok(())
    }

    fn validate_classifier(&self) -> Result<(), LoadError> {
        let n_features = self.features.len();
        match &self.classifier {
            ClassifierSpec::LogisticRegression {
                coefficients,
                intercept,
            } => {
                if coefficients.len() != n_features {
                    return Err(invalid(format!(
                        "logistic regression has {} coefficients for {n_features} features",
                        coefficients.len()
                    )));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(invalid("logistic regression parameters must be finite"));
                }
                Ok(())
            }
            ClassifierSpec::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(invalid("random forest has no trees"));
                }
                for (index, tree) in trees.iter().enumerate() {
                    validate_tree(tree, n_features)
                        .map_err(|reason| invalid(format!("tree {index}: {reason}")))?;
                }
                Ok(())
            }
        }
    }
}

fn validate_tree(tree: &TreeSpec, n_features: usize) -> Result<(), String> {
    if tree.nodes.is_empty() {
        return Err("tree has no nodes".into());
    }
    let n_nodes = tree.nodes.len();
    for (index, node) in tree.nodes.iter().enumerate() {
        match node {
            NodeSpec::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= n_features {
                    return Err(format!(
                        "node {index} splits on feature {feature} but there are {n_features}"
                    ));
                }
                if !threshold.is_finite() {
                    return Err(format!("node {index} has a non-finite threshold"));
                }
                for child in [left, right] {
                    if *child <= index || *child >= n_nodes {
                        return Err(format!(
                            "node {index} has child {child} outside ({index}, {n_nodes})"
                        ));
                    }
                }
            }
            NodeSpec::Leaf { counts } => {
                if counts.iter().any(|c| !c.is_finite() || *c < 0.0) {
                    return Err(format!("leaf {index} has negative or non-finite counts"));
                }
                if counts.iter().sum::<f64>() <= 0.0 {
                    return Err(format!("leaf {index} has no samples"));
                }
            }
        }
    }
    Ok(())
}

fn check_format_version(document: &serde_json::Value) -> Result<(), LoadError> {
    match document.get("format_version") {
        // A missing version is reported by schema validation.
        None => Ok(()),
        Some(version) if version.as_u64() == Some(u64::from(SUPPORTED_FORMAT_VERSION)) => Ok(()),
        Some(version) => Err(LoadError::IncompatibleVersion {
            found: version.to_string(),
            supported: SUPPORTED_FORMAT_VERSION,
        }),
    }
}

fn invalid(reason: impl Into<String>) -> LoadError {
    LoadError::Invalid(reason.into())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn document() -> serde_json::Value {
        json!({
            "format_version": 1,
            "model_version": "test",
            "trained_on": "2025-07-08",
            "features": [
                {"kind": "numeric", "name": "Pclass", "field": "passenger_class"},
                {"kind": "indicator", "name": "Sex_male", "field": "sex", "value": "male"}
            ],
            "categories": {"sex": ["female", "male"]},
            "classifier": {"type": "logistic_regression", "coefficients": [-1.0, -2.5], "intercept": 3.0}
        })
    }

    #[test]
    fn accepts_minimal_document_with_default_preprocessing() {
        let artifact = ModelArtifact::from_value(document()).expect("valid artifact");
        assert_eq!(artifact.preprocessing, Preprocessing::default());
        assert_eq!(artifact.display_version(), "test (trained on 2025-07-08)");
        assert_eq!(artifact.classifier.kind(), "logistic_regression");
    }

    #[test]
    fn rejects_other_format_versions_before_schema_check() {
        let mut doc = document();
        doc["format_version"] = json!(2);
        doc["unexpected"] = json!(true);
        let err = ModelArtifact::from_value(doc).expect_err("version 2 is unsupported");
        assert!(matches!(err, LoadError::IncompatibleVersion { ref found, supported: 1 } if found == "2"));
    }

    #[test]
    fn rejects_unknown_top_level_keys() {
        let mut doc = document();
        doc["pickle_protocol"] = json!(4);
        assert!(matches!(
            ModelArtifact::from_value(doc),
            Err(LoadError::Schema { .. })
        ));
    }

    #[test]
    fn rejects_coefficient_count_mismatch() {
        let mut doc = document();
        doc["classifier"]["coefficients"] = json!([1.0]);
        let err = ModelArtifact::from_value(doc).expect_err("shape mismatch");
        assert!(err.to_string().contains("1 coefficients for 2 features"));
    }

    #[test]
    fn rejects_indicator_for_undeclared_category() {
        let mut doc = document();
        doc["features"][1]["value"] = json!("unknown");
        let err = ModelArtifact::from_value(doc).expect_err("bad indicator");
        assert!(matches!(err, LoadError::Invalid(_)));
    }

    #[test]
    fn rejects_duplicate_feature_names() {
        let mut doc = document();
        doc["features"][1] = json!({"kind": "numeric", "name": "Pclass", "field": "age"});
        let err = ModelArtifact::from_value(doc).expect_err("duplicate");
        assert!(err.to_string().contains("duplicate feature 'Pclass'"));
    }

    #[test]
    fn rejects_tree_with_backward_child() {
        let mut doc = document();
        doc["classifier"] = json!({
            "type": "random_forest",
            "trees": [{"nodes": [
                {"split": {"feature": 0, "threshold": 1.5, "left": 1, "right": 0}},
                {"leaf": {"counts": [1.0, 1.0]}}
            ]}]
        });
        let err = ModelArtifact::from_value(doc).expect_err("cycle");
        assert!(err.to_string().contains("tree 0"));
    }

    #[test]
    fn rejects_empty_leaf() {
        let mut doc = document();
        doc["classifier"] = json!({
            "type": "random_forest",
            "trees": [{"nodes": [{"leaf": {"counts": [0.0, 0.0]}}]}]
        });
        let err = ModelArtifact::from_value(doc).expect_err("empty leaf");
        assert!(err.to_string().contains("no samples"));
    }

    #[test]
    fn rejects_default_port_outside_categories() {
        let mut doc = document();
        doc["categories"]["embarked"] = json!(["C", "Q"]);
        doc["preprocessing"] = json!({"median_age": 28.0, "default_embarked": "S"});
        let err = ModelArtifact::from_value(doc).expect_err("default port undeclared");
        assert!(err.to_string().contains("default_embarked"));
    }

    #[rstest]
    #[case(0.0, true)]
    #[case(100.0, true)]
    #[case(28.5, true)]
    #[case(-0.5, false)]
    #[case(100.5, false)]
    fn median_age_bounds_are_inclusive(#[case] median_age: f64, #[case] accepted: bool) {
        let mut doc = document();
        doc["preprocessing"] = json!({"median_age": median_age, "default_embarked": "S"});
        let result = ModelArtifact::from_value(doc);
        assert_eq!(result.is_ok(), accepted, "median_age {median_age}: {result:?}");
        if !accepted {
            assert!(matches!(result, Err(LoadError::Invalid(ref message)) if message.contains("[0, 100]")));
        }
    }
}
