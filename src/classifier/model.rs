use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classifier::{Label, errors::ConfigurationError, vectorizer::FeatureVector};

const KIND: &str = "model";

/// Marks a leaf in the child arrays.
const LEAF: i64 = -1;

/// A fitted binary classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BinaryModel {
    /// Flagged when `coefficients · x + intercept > 0`.
    Linear {
        coefficients: Vec<f64>,
        #[serde(default)]
        intercept: f64,
    },
    /// Majority of averaged per-tree class probabilities.
    Forest {
        n_features: usize,
        trees: Vec<DecisionTree>,
    },
}

/// One decision tree in flat array form.
///
/// Node `i` is a leaf when `children_left[i] == -1`; otherwise samples with
/// `x[feature[i]] <= threshold[i]` go left. `value[i]` holds the class
/// weights `[benign, flagged]` seen at that node during training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<[f64; 2]>,
}

impl DecisionTree {
    fn validate(&self, n_features: usize) -> Result<(), ConfigurationError> {
        let n_nodes = self.children_left.len();
        if n_nodes == 0 {
            return Err(ConfigurationError::invalid(KIND, "tree has no nodes"));
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n_nodes)
        {
            return Err(ConfigurationError::invalid(KIND, "tree arrays differ in length"));
        }

        for node in 0..n_nodes {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF && right == LEAF {
                continue;
            }
            // children always come after their parent, which rules out cycles
            let in_range = |child: i64| child > node as i64 && (child as usize) < n_nodes;
            if !in_range(left) || !in_range(right) {
                return Err(ConfigurationError::invalid(
                    KIND,
                    format!("node {node} has invalid children ({left}, {right})"),
                ));
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(ConfigurationError::invalid(
                    KIND,
                    format!("node {node} splits on unknown feature {feature}"),
                ));
            }
        }
        Ok(())
    }

    /// Class probabilities `[benign, flagged]` at the leaf reached by `x`.
    fn predict_proba(&self, x: &FeatureVector) -> [f64; 2] {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if x.get(feature) <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        let [benign, flagged] = self.value[node];
        let total = benign + flagged;
        if total > 0.0 {
            [benign / total, flagged / total]
        } else {
            [0.0, 0.0]
        }
    }
}

impl BinaryModel {
    /// Width of the feature vectors the model was fitted on.
    pub fn n_features(&self) -> usize {
        match self {
            Self::Linear { coefficients, .. } => coefficients.len(),
            Self::Forest { n_features, .. } => *n_features,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Linear {
                coefficients,
                intercept,
            } => {
                if coefficients.is_empty() {
                    return Err(ConfigurationError::invalid(KIND, "no coefficients"));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(ConfigurationError::invalid(KIND, "non-finite weight"));
                }
                Ok(())
            }
            Self::Forest { n_features, trees } => {
                if trees.is_empty() {
                    return Err(ConfigurationError::invalid(KIND, "forest has no trees"));
                }
                trees.iter().try_for_each(|tree| tree.validate(*n_features))
            }
        }
    }

    pub fn predict(&self, x: &FeatureVector) -> Label {
        match self {
            Self::Linear {
                coefficients,
                intercept,
            } => Label::from(x.dot(coefficients) + intercept > 0.0),
            Self::Forest { trees, .. } => {
                let [benign, flagged] = trees.iter().fold([0.0, 0.0], |acc, tree| {
                    let [b, f] = tree.predict_proba(x);
                    [acc[0] + b, acc[1] + f]
                });
                // ties go to the benign class
                Label::from(flagged > benign)
            }
        }
    }

    /// Predict a whole collection at once; output order matches input.
    pub fn predict_batch(&self, features: &[FeatureVector]) -> Vec<Label> {
        features.par_iter().map(|x| self.predict(x)).collect()
    }
}
