//! # lb-model
//!
//! Model artifact loading, feature encoding, and prediction for Lifeboat.
//!
//! A model artifact is a JSON document carrying the trained classifier together
//! with the encoding contract it was trained against: the ordered feature list,
//! the accepted categories per categorical field, and preprocessing defaults.
//!
//! Loading is explicit and checked in stages:
//! 1. read and parse the JSON
//! 2. check `format_version`
//! 3. validate against the JSON Schema generated from [`artifact::ModelArtifact`]
//! 4. deserialize and run semantic checks (shape, tree integrity, categories)
//!
//! # Usage
//!
//! ```no_run
//! use lb_core::form::PassengerForm;
//! use lb_model::Predictor;
//!
//! let predictor = Predictor::load("models/titanic_model.json").expect("model");
//! let mut form = PassengerForm::default();
//! form.set("name", "Braund, Mr. Owen Harris");
//! let input = form.collect(&predictor.form_defaults()).expect("valid form");
//! let result = predictor.predict_input(&input).expect("prediction");
//! println!("{} ({:.2}%)", result.label, result.confidence_percent());
//! ```

pub mod artifact;
pub mod classifier;
pub mod encoder;
mod error;
pub mod predictor;
pub mod schema;

pub use classifier::Classifier;
pub use encoder::{FeatureEncoder, FeatureVector};
pub use error::{EncodingError, LoadError, ModelError, PredictError};
pub use predictor::{ModelInfo, Predictor};
