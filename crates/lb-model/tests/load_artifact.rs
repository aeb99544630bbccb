//! Integration tests for loading model artifacts from disk.

use std::path::PathBuf;

use lb_core::enums::{PassengerClass, Port, Sex, SurvivalLabel, Title};
use lb_core::entities::PassengerInput;
use lb_core::form::PassengerForm;
use lb_model::{LoadError, Predictor};
use proptest::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn shipped_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../models/titanic_model.json")
}

fn write_artifact(dir: &TempDir, value: &serde_json::Value) -> PathBuf {
    let path = dir.path().join("model.json");
    std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path
}

fn forest_artifact() -> serde_json::Value {
    json!({
        "format_version": 1,
        "model_version": "forest-test",
        "trained_on": "2025-07-08",
        "features": [
            {"kind": "numeric", "name": "Pclass", "field": "passenger_class"},
            {"kind": "indicator", "name": "Sex_male", "field": "sex", "value": "male"},
            {"kind": "numeric", "name": "Age", "field": "age"}
        ],
        "categories": {"sex": ["female", "male"]},
        "classifier": {
            "type": "random_forest",
            "trees": [
                {"nodes": [
                    {"split": {"feature": 1, "threshold": 0.5, "left": 1, "right": 2}},
                    {"leaf": {"counts": [26.0, 74.0]}},
                    {"leaf": {"counts": [81.0, 19.0]}}
                ]},
                {"nodes": [
                    {"split": {"feature": 0, "threshold": 2.5, "left": 1, "right": 4}},
                    {"split": {"feature": 2, "threshold": 10.0, "left": 2, "right": 3}},
                    {"leaf": {"counts": [1.0, 9.0]}},
                    {"leaf": {"counts": [4.0, 6.0]}},
                    {"leaf": {"counts": [3.0, 1.0]}}
                ]}
            ]
        }
    })
}

fn passenger(sex: Sex, class: PassengerClass, age: f64) -> PassengerInput {
    PassengerInput {
        name: "Test, Miss. Example".into(),
        passenger_class: class,
        sex,
        age,
        siblings_spouses: 0,
        parents_children: 0,
        fare: 30.0,
        embarked: Port::Southampton,
        has_cabin: false,
        title: Title::Miss,
    }
}

#[test]
fn shipped_model_loads() {
    let predictor = Predictor::load(shipped_model_path()).expect("shipped model loads");
    let info = predictor.info();
    assert_eq!(info.display_version, "1.0 (trained on 2025-07-08)");
    assert_eq!(info.n_features, 14);
    assert_eq!(info.features[0], "Pclass");
    assert_eq!(info.features[13], "Title_Other");
    assert_eq!(info.n_trees, None);
}

#[test]
fn documented_example_predicts_with_complementary_probabilities() {
    let predictor = Predictor::load(shipped_model_path()).unwrap();
    let mut form = PassengerForm::default();
    form.set("name", "Cumings, Mrs. John Bradley");
    form.set("age", "29");
    form.set("sex", "female");
    form.set("passenger_class", "1");
    form.set("fare", "100.0");
    form.set("embarked", "S");
    let input = form.collect(&predictor.form_defaults()).unwrap();

    let result = predictor.predict_input(&input).unwrap();
    assert!((result.probability_survived + result.probability_not_survived - 1.0).abs() < 1e-9);
    assert_eq!(result.label, SurvivalLabel::Survived);
}

#[test]
fn missing_artifact_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = Predictor::load(dir.path().join("nope.json")).expect_err("missing");
    assert!(matches!(err, LoadError::Missing { .. }));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn unreadable_artifact_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = Predictor::load(dir.path()).expect_err("a directory is not a model file");
    assert!(matches!(err, LoadError::Io { ref path, .. } if path == dir.path()));
    assert!(err.to_string().starts_with("Failed to read model artifact"));
}

#[test]
fn corrupt_artifact_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.pkl");
    std::fs::write(&path, b"\x80\x04\x95 not json").unwrap();
    assert!(matches!(
        Predictor::load(&path),
        Err(LoadError::Corrupt { .. })
    ));
}

#[test]
fn incompatible_version_is_reported() {
    let dir = TempDir::new().unwrap();
    let mut artifact = forest_artifact();
    artifact["format_version"] = json!(0);
    let err = Predictor::load(write_artifact(&dir, &artifact)).expect_err("version 0");
    assert!(matches!(err, LoadError::IncompatibleVersion { supported: 1, .. }));
}

#[test]
fn forest_artifact_predicts() {
    let dir = TempDir::new().unwrap();
    let predictor = Predictor::load(write_artifact(&dir, &forest_artifact())).unwrap();
    assert_eq!(predictor.info().classifier, "random_forest");
    assert_eq!(predictor.info().n_trees, Some(2));
    assert_eq!(predictor.info().features, ["Pclass", "Sex_male", "Age"]);

    // female child in 1st class: (0.74 + 0.9) / 2
    let result = predictor
        .predict_input(&passenger(Sex::Female, PassengerClass::First, 8.0))
        .unwrap();
    assert!((result.probability_survived - 0.82).abs() < 1e-9);
    assert_eq!(result.label, SurvivalLabel::Survived);

    // adult male in 3rd class: (0.19 + 0.25) / 2
    let result = predictor
        .predict_input(&passenger(Sex::Male, PassengerClass::Third, 40.0))
        .unwrap();
    assert!((result.probability_survived - 0.22).abs() < 1e-9);
    assert_eq!(result.label, SurvivalLabel::NotSurvived);
}

fn arb_passenger() -> impl Strategy<Value = PassengerInput> {
    (
        prop_oneof![
            Just(PassengerClass::First),
            Just(PassengerClass::Second),
            Just(PassengerClass::Third)
        ],
        prop_oneof![Just(Sex::Male), Just(Sex::Female)],
        0.1f64..=100.0,
        0u8..=10,
        0u8..=10,
        0.0f64..600.0,
        prop_oneof![
            Just(Port::Cherbourg),
            Just(Port::Queenstown),
            Just(Port::Southampton)
        ],
        any::<bool>(),
        prop_oneof![
            Just(Title::Mr),
            Just(Title::Miss),
            Just(Title::Mrs),
            Just(Title::Other)
        ],
    )
        .prop_map(
            |(passenger_class, sex, age, siblings_spouses, parents_children, fare, embarked, has_cabin, title)| {
                PassengerInput {
                    name: "Generated, Mr. Passenger".into(),
                    passenger_class,
                    sex,
                    age,
                    siblings_spouses,
                    parents_children,
                    fare,
                    embarked,
                    has_cabin,
                    title,
                }
            },
        )
}

proptest! {
    #[test]
    fn probabilities_sum_to_one_for_all_valid_inputs(input in arb_passenger()) {
        let predictor = Predictor::load(shipped_model_path()).unwrap();
        let result = predictor.predict_input(&input).unwrap();
        prop_assert!((0.0..=1.0).contains(&result.probability_survived));
        prop_assert!((result.probability_survived + result.probability_not_survived - 1.0).abs() < 1e-9);
        prop_assert_eq!(
            result.label == SurvivalLabel::Survived,
            result.probability_survived > 0.5
        );
    }

    #[test]
    fn encoding_is_deterministic_for_all_valid_inputs(input in arb_passenger()) {
        let predictor = Predictor::load(shipped_model_path()).unwrap();
        let first = predictor.encoder().encode(&input).unwrap();
        let second = predictor.encoder().encode(&input.clone()).unwrap();
        prop_assert_eq!(first, second);
    }
}
