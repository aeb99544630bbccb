//! Passenger input to feature vector encoding.
//!
//! The layout is whatever the artifact's feature list says; nothing about
//! column order or category mapping is hard-coded here.

use lb_core::entities::PassengerInput;
use serde::Serialize;

use crate::artifact::{Categories, CategoricalField, FeatureSpec, NumericField};
use crate::error::EncodingError;

/// Fixed-order numeric encoding of one passenger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    features: Vec<FeatureSpec>,
    categories: Categories,
}

impl FeatureEncoder {
    #[must_use]
    pub const fn new(features: Vec<FeatureSpec>, categories: Categories) -> Self {
        Self {
            features,
            categories,
        }
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(FeatureSpec::name)
    }

    /// Encode validated passenger input.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError::UnknownCategory` when a categorical value was
    /// not among the categories the model was trained on.
    pub fn encode(&self, input: &PassengerInput) -> Result<FeatureVector, EncodingError> {
        for field in [
            CategoricalField::Sex,
            CategoricalField::Embarked,
            CategoricalField::Title,
        ] {
            let declared = self.categories.for_field(field);
            let value = categorical_value(input, field);
            if !declared.is_empty() && !declared.iter().any(|d| d == value) {
                return Err(EncodingError::UnknownCategory {
                    field,
                    value: value.to_string(),
                    expected: declared.to_vec(),
                });
            }
        }

        let values = self
            .features
            .iter()
            .map(|feature| match feature {
                FeatureSpec::Numeric { field, .. } => numeric_value(input, *field),
                FeatureSpec::Indicator { field, value, .. } => {
                    if categorical_value(input, *field) == value.as_str() {
                        1.0
                    } else {
                        0.0
                    }
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(features = ?values, "encoded passenger input");
        Ok(FeatureVector(values))
    }
}

fn numeric_value(input: &PassengerInput, field: NumericField) -> f64 {
    match field {
        NumericField::PassengerClass => f64::from(input.passenger_class.as_number()),
        NumericField::Age => input.age,
        NumericField::SiblingsSpouses => f64::from(input.siblings_spouses),
        NumericField::ParentsChildren => f64::from(input.parents_children),
        NumericField::Fare => input.fare,
        NumericField::HasCabin => {
            if input.has_cabin {
                1.0
            } else {
                0.0
            }
        }
        NumericField::FamilySize => f64::from(input.family_size()),
    }
}

fn categorical_value(input: &PassengerInput, field: CategoricalField) -> &'static str {
    match field {
        CategoricalField::Sex => input.sex.as_str(),
        CategoricalField::Embarked => input.embarked.as_str(),
        CategoricalField::Title => input.title.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use lb_core::enums::{PassengerClass, Port, Sex, Title};
    use pretty_assertions::assert_eq;

    use super::*;

    fn numeric(name: &str, field: NumericField) -> FeatureSpec {
        FeatureSpec::Numeric {
            name: name.into(),
            field,
        }
    }

    fn indicator(name: &str, field: CategoricalField, value: &str) -> FeatureSpec {
        FeatureSpec::Indicator {
            name: name.into(),
            field,
            value: value.into(),
        }
    }

    fn encoder(embarked: &[&str]) -> FeatureEncoder {
        FeatureEncoder::new(
            vec![
                numeric("Pclass", NumericField::PassengerClass),
                numeric("Age", NumericField::Age),
                numeric("Has_Cabin", NumericField::HasCabin),
                numeric("FamilySize", NumericField::FamilySize),
                indicator("Sex_male", CategoricalField::Sex, "male"),
                indicator("Embarked_Q", CategoricalField::Embarked, "Q"),
                indicator("Embarked_S", CategoricalField::Embarked, "S"),
                indicator("Title_Mrs", CategoricalField::Title, "Mrs"),
            ],
            Categories {
                sex: vec!["female".into(), "male".into()],
                embarked: embarked.iter().map(ToString::to_string).collect(),
                title: vec![],
            },
        )
    }

    fn passenger() -> PassengerInput {
        PassengerInput {
            name: "Cumings, Mrs. John Bradley".into(),
            passenger_class: PassengerClass::First,
            sex: Sex::Female,
            age: 38.0,
            siblings_spouses: 1,
            parents_children: 2,
            fare: 71.28,
            embarked: Port::Queenstown,
            has_cabin: true,
            title: Title::Mrs,
        }
    }

    #[test]
    fn encodes_in_declared_order() {
        let vector = encoder(&["C", "Q", "S"]).encode(&passenger()).unwrap();
        assert_eq!(
            vector.as_slice(),
            &[1.0, 38.0, 1.0, 4.0, 0.0, 1.0, 0.0, 1.0]
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let encoder = encoder(&["C", "Q", "S"]);
        let first = encoder.encode(&passenger()).unwrap();
        let second = encoder.encode(&passenger()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_category_the_model_never_saw() {
        let err = encoder(&["C", "S"]).encode(&passenger()).unwrap_err();
        assert_eq!(
            err,
            EncodingError::UnknownCategory {
                field: CategoricalField::Embarked,
                value: "Q".into(),
                expected: vec!["C".into(), "S".into()],
            }
        );
        assert!(err.to_string().contains("expected one of: C, S"));
    }

    #[test]
    fn feature_names_follow_vector_order() {
        let encoder = encoder(&["C", "Q", "S"]);
        let vector = encoder.encode(&passenger()).unwrap();
        let names: Vec<_> = encoder.feature_names().collect();
        assert_eq!(names.len(), vector.len());
        assert_eq!(names[3], "FamilySize");
        assert_eq!(vector.as_slice()[3], 4.0);
    }
}
