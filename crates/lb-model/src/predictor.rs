//! The loaded model: encoder plus classifier, immutable after load.

use std::path::Path;

use lb_core::entities::{PassengerInput, PredictionResult};
use lb_core::form::FormDefaults;
use serde::Serialize;

use crate::artifact::{ClassifierSpec, ModelArtifact, Preprocessing};
use crate::classifier::{self, Classifier};
use crate::encoder::{FeatureEncoder, FeatureVector};
use crate::error::{LoadError, ModelError, PredictError};

#[derive(Debug)]
pub struct Predictor {
    encoder: FeatureEncoder,
    classifier: Box<dyn Classifier>,
    preprocessing: Preprocessing,
    info: ModelInfo,
}

/// Model card shown by `lifeboat model` and in report footers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub format_version: u32,
    pub model_version: String,
    pub trained_on: String,
    /// `"{model_version} (trained on {trained_on})"`
    pub display_version: String,
    pub classifier: String,
    pub n_features: usize,
    /// Tree count of a `random_forest` classifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_trees: Option<usize>,
    pub features: Vec<String>,
}

impl Predictor {
    /// Load and validate a model artifact.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the artifact is missing, corrupt, of an
    /// unsupported format version, fails schema validation, or is inconsistent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let artifact = ModelArtifact::from_path(path)?;
        let predictor = Self::from_artifact(artifact);
        tracing::info!(
            path = %path.display(),
            version = %predictor.info.display_version,
            classifier = %predictor.info.classifier,
            "model loaded"
        );
        Ok(predictor)
    }

    /// Build from an artifact that already passed [`ModelArtifact::validate`].
    #[must_use]
    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        let n_features = artifact.features.len();
        let classifier = classifier::from_spec(&artifact.classifier, n_features);
        let n_trees = match &artifact.classifier {
            ClassifierSpec::RandomForest { trees } => Some(trees.len()),
            ClassifierSpec::LogisticRegression { .. } => None,
        };
        let display_version = artifact.display_version();
        let encoder = FeatureEncoder::new(artifact.features, artifact.categories);
        let info = ModelInfo {
            format_version: artifact.format_version,
            model_version: artifact.model_version,
            trained_on: artifact.trained_on.to_string(),
            display_version,
            classifier: artifact.classifier.kind().to_string(),
            n_features,
            n_trees,
            features: encoder.feature_names().map(str::to_string).collect(),
        };
        Self {
            encoder,
            classifier,
            preprocessing: artifact.preprocessing,
            info,
        }
    }

    #[must_use]
    pub const fn info(&self) -> &ModelInfo {
        &self.info
    }

    #[must_use]
    pub const fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    /// Imputation defaults the form collector must apply for this model.
    #[must_use]
    pub const fn form_defaults(&self) -> FormDefaults {
        FormDefaults {
            median_age: self.preprocessing.median_age,
            default_embarked: self.preprocessing.default_embarked,
        }
    }

    /// Predict from an encoded feature vector. Side-effect free.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::ShapeMismatch` when the vector length is wrong.
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, ModelError> {
        let expected = self.classifier.n_features();
        if features.len() != expected {
            return Err(ModelError::ShapeMismatch {
                expected,
                found: features.len(),
            });
        }

        let label = self.classifier.predict(features.as_slice());
        let probability = self.classifier.predict_proba(features.as_slice());
        Ok(PredictionResult::new(label, probability)?)
    }

    /// Encode then predict.
    ///
    /// # Errors
    ///
    /// `PredictError::Encoding` is recoverable; `PredictError::Model` is not.
    pub fn predict_input(&self, input: &PassengerInput) -> Result<PredictionResult, PredictError> {
        let features = self.encoder.encode(input)?;
        let result = self.predict(&features)?;
        tracing::debug!(
            label = %result.label,
            probability_survived = result.probability_survived,
            "prediction computed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn predictor() -> Predictor {
        let artifact = ModelArtifact::from_value(json!({
            "format_version": 1,
            "model_version": "unit",
            "trained_on": "2025-07-08",
            "features": [
                {"kind": "numeric", "name": "Fare", "field": "fare"},
                {"kind": "indicator", "name": "Sex_male", "field": "sex", "value": "male"}
            ],
            "categories": {"sex": ["female", "male"]},
            "preprocessing": {"median_age": 30.0, "default_embarked": "C"},
            "classifier": {"type": "logistic_regression", "coefficients": [0.01, -2.0], "intercept": 0.5}
        }))
        .expect("valid artifact");
        Predictor::from_artifact(artifact)
    }

    #[test]
    fn exposes_model_card() {
        let predictor = predictor();
        let info = predictor.info();
        assert_eq!(info.display_version, "unit (trained on 2025-07-08)");
        assert_eq!(info.classifier, "logistic_regression");
        assert_eq!(info.features, vec!["Fare", "Sex_male"]);
    }

    #[test]
    fn form_defaults_come_from_artifact() {
        let defaults = predictor().form_defaults();
        assert_eq!(defaults.median_age, 30.0);
        assert_eq!(defaults.default_embarked, lb_core::enums::Port::Cherbourg);
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let err = predictor()
            .predict(&FeatureVector::from(vec![1.0]))
            .expect_err("one value for two features");
        assert_eq!(
            err,
            ModelError::ShapeMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn label_agrees_with_probability() {
        let predictor = predictor();
        let survived = predictor.predict(&FeatureVector::from(vec![100.0, 0.0])).unwrap();
        assert_eq!(survived.label, lb_core::enums::SurvivalLabel::Survived);
        assert!(survived.probability_survived > 0.5);

        let drowned = predictor.predict(&FeatureVector::from(vec![5.0, 1.0])).unwrap();
        assert_eq!(drowned.label, lb_core::enums::SurvivalLabel::NotSurvived);
        assert!(drowned.probability_survived < 0.5);
    }
}
