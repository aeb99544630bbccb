//! Binary classifiers behind the [`Classifier`] trait.
//!
//! Callers hand in feature slices of exactly [`Classifier::n_features`]
//! values; [`crate::Predictor`] checks the shape before calling in.

use std::fmt;

use lb_core::enums::SurvivalLabel;

use crate::artifact::{ClassifierSpec, NodeSpec, TreeSpec};

/// Decision threshold on `P(survived)`; ties go to "not survived".
pub const DECISION_THRESHOLD: f64 = 0.5;

pub trait Classifier: fmt::Debug + Send + Sync {
    /// Short name of the model family.
    fn kind(&self) -> &'static str;

    /// Expected feature vector length.
    fn n_features(&self) -> usize;

    /// Probability of the positive class (survived).
    fn predict_proba(&self, features: &[f64]) -> f64;

    /// Hard label.
    fn predict(&self, features: &[f64]) -> SurvivalLabel {
        if self.predict_proba(features) > DECISION_THRESHOLD {
            SurvivalLabel::Survived
        } else {
            SurvivalLabel::NotSurvived
        }
    }
}

/// Build the classifier described by a validated artifact.
#[must_use]
pub fn from_spec(spec: &ClassifierSpec, n_features: usize) -> Box<dyn Classifier> {
    match spec {
        ClassifierSpec::LogisticRegression {
            coefficients,
            intercept,
        } => Box::new(LogisticRegression::new(coefficients.clone(), *intercept)),
        ClassifierSpec::RandomForest { trees } => Box::new(RandomForest::new(
            trees.iter().map(DecisionTree::from_spec).collect(),
            n_features,
        )),
    }
}

/// Sigmoid function: 1 / (1 + exp(-x))
#[inline]
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

// ============================================================================
// Logistic regression
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    #[must_use]
    pub const fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Raw margin `w · x + b`.
    #[must_use]
    pub fn decision_function(&self, features: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_proba(&self, features: &[f64]) -> f64 {
        sigmoid(self.decision_function(features))
    }
}

// ============================================================================
// Random forest
// ============================================================================

/// Split condition for a decision node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCondition {
    pub feature_index: usize,
    pub threshold: f64,
}

impl SplitCondition {
    /// Left when the value is at or below the threshold.
    #[inline]
    #[must_use]
    pub fn go_left(&self, feature_value: f64) -> bool {
        feature_value <= self.threshold
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Split {
        condition: SplitCondition,
        left: usize,
        right: usize,
    },
    /// Fraction of survivors among the training samples at this leaf.
    Leaf(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    #[must_use]
    pub fn from_spec(spec: &TreeSpec) -> Self {
        let nodes = spec
            .nodes
            .iter()
            .map(|node| match node {
                NodeSpec::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => Node::Split {
                    condition: SplitCondition {
                        feature_index: *feature,
                        threshold: *threshold,
                    },
                    left: *left,
                    right: *right,
                },
                NodeSpec::Leaf { counts } => Node::Leaf(counts[1] / (counts[0] + counts[1])),
            })
            .collect();
        Self { nodes }
    }

    /// Walk from the root to a leaf. Children come after their parent, so
    /// the walk always terminates.
    #[must_use]
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf(value) => return *value,
                Node::Split {
                    condition,
                    left,
                    right,
                } => {
                    index = if condition.go_left(features[condition.feature_index]) {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
}

impl RandomForest {
    #[must_use]
    pub const fn new(trees: Vec<DecisionTree>, n_features: usize) -> Self {
        Self { trees, n_features }
    }
}

impl Classifier for RandomForest {
    fn kind(&self) -> &'static str {
        "random_forest"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .trees
            .iter()
            .map(|tree| tree.predict_row(features))
            .sum();
        (total / self.trees.len() as f64).clamp(0.0, 1.0)
    }
}
