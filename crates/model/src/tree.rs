//! Decision trees and random forests.
//!
//! Trees arrive as the parallel-array layout tree learners export:
//! `children_left[i]`, `children_right[i]`, `feature[i]`, `threshold[i]` and
//! `value[i]` describe node `i`, and `-1` marks a leaf. A sample goes left
//! when `x[feature] <= threshold`.

use crate::error::{InferenceError, ModelError, Result};
use crate::label::ClassLabel;
use crate::traits::Classifier;
use crate::{check_features, label_for_max};
use serde::{Deserialize, Serialize};
use tracing::debug;

const LEAF: i64 = -1;

/// Raw parallel-array form of a single tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArrays {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class counts or weights; only leaf rows are used
    pub value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        distribution: Vec<f64>,
    },
}

/// A validated tree.
///
/// Every child index is greater than its parent's, so a walk from the root
/// always reaches a leaf.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Validate the raw arrays against the class count and feature width.
    pub fn from_arrays(arrays: TreeArrays, n_classes: usize, n_features: usize) -> Result<Self> {
        const MODEL: &str = "decision tree";

        let n = arrays.children_left.len();
        if n == 0 {
            return Err(ModelError::invalid(MODEL, "tree has no nodes"));
        }
        if arrays.children_right.len() != n
            || arrays.feature.len() != n
            || arrays.threshold.len() != n
            || arrays.value.len() != n
        {
            return Err(ModelError::invalid(MODEL, "node arrays have different lengths"));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let left = arrays.children_left[i];
            let right = arrays.children_right[i];

            if left == LEAF && right == LEAF {
                let row = &arrays.value[i];
                if row.len() != n_classes {
                    return Err(ModelError::invalid(
                        MODEL,
                        format!("leaf {} has {} values for {} classes", i, row.len(), n_classes),
                    ));
                }
                nodes.push(Node::Leaf {
                    distribution: normalize(row),
                });
                continue;
            }

            let child = |c: i64| -> Result<usize> {
                usize::try_from(c)
                    .ok()
                    .filter(|&c| c > i && c < n)
                    .ok_or_else(|| ModelError::invalid(MODEL, format!("node {} has invalid child {}", i, c)))
            };
            let feature = usize::try_from(arrays.feature[i])
                .ok()
                .filter(|&f| f < n_features)
                .ok_or_else(|| {
                    ModelError::invalid(
                        MODEL,
                        format!("node {} splits on feature {} of {}", i, arrays.feature[i], n_features),
                    )
                })?;

            nodes.push(Node::Split {
                feature,
                threshold: arrays.threshold[i],
                left: child(left)?,
                right: child(right)?,
            });
        }

        Ok(Self { nodes })
    }

    /// Class distribution of the leaf a sample lands in.
    fn leaf_distribution(&self, features: &[f64]) -> &[f64] {
        let mut i = 0;
        loop {
            match &self.nodes[i] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    i = if features[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn normalize(row: &[f64]) -> Vec<f64> {
    let total: f64 = row.iter().sum();
    if total > 0.0 {
        row.iter().map(|v| v / total).collect()
    } else {
        vec![1.0 / row.len() as f64; row.len()]
    }
}

fn validate_header(model: &'static str, classes: &[ClassLabel], n_features: usize) -> Result<()> {
    if classes.is_empty() {
        return Err(ModelError::invalid(model, "no classes"));
    }
    if n_features == 0 {
        return Err(ModelError::invalid(model, "n_features must be positive"));
    }
    Ok(())
}

/// A single decision tree classifier.
#[derive(Debug, Clone)]
pub struct DecisionTreeClassifier {
    classes: Vec<ClassLabel>,
    n_features: usize,
    tree: Tree,
}

impl DecisionTreeClassifier {
    pub fn new(classes: Vec<ClassLabel>, n_features: usize, tree: TreeArrays) -> Result<Self> {
        validate_header("DecisionTreeClassifier", &classes, n_features)?;
        let tree = Tree::from_arrays(tree, classes.len(), n_features)?;
        Ok(Self {
            classes,
            n_features,
            tree,
        })
    }
}

impl Classifier for DecisionTreeClassifier {
    fn type_name(&self) -> &str {
        "DecisionTreeClassifier"
    }

    fn predict(&self, features: &[f64]) -> std::result::Result<ClassLabel, InferenceError> {
        let proba = self.predict_proba(features)?;
        label_for_max(&self.classes, &proba)
    }

    fn predict_proba(&self, features: &[f64]) -> std::result::Result<Vec<f64>, InferenceError> {
        check_features(self.n_features, features)?;
        Ok(self.tree.leaf_distribution(features).to_vec())
    }

    fn class_labels(&self) -> Option<&[ClassLabel]> {
        Some(&self.classes)
    }
}

/// An ensemble of trees; probabilities are the mean of the trees' leaf
/// distributions.
#[derive(Debug, Clone)]
pub struct RandomForestClassifier {
    classes: Vec<ClassLabel>,
    n_features: usize,
    estimators: Vec<Tree>,
}

impl RandomForestClassifier {
    pub fn new(classes: Vec<ClassLabel>, n_features: usize, estimators: Vec<TreeArrays>) -> Result<Self> {
        validate_header("RandomForestClassifier", &classes, n_features)?;
        if estimators.is_empty() {
            return Err(ModelError::invalid("RandomForestClassifier", "forest has no trees"));
        }

        let n_classes = classes.len();
        let estimators = estimators
            .into_iter()
            .map(|arrays| Tree::from_arrays(arrays, n_classes, n_features))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Built random forest with {} trees ({} nodes total)",
            estimators.len(),
            estimators.iter().map(Tree::node_count).sum::<usize>()
        );

        Ok(Self {
            classes,
            n_features,
            estimators,
        })
    }

    pub fn n_estimators(&self) -> usize {
        self.estimators.len()
    }
}

impl Classifier for RandomForestClassifier {
    fn type_name(&self) -> &str {
        "RandomForestClassifier"
    }

    fn predict(&self, features: &[f64]) -> std::result::Result<ClassLabel, InferenceError> {
        let proba = self.predict_proba(features)?;
        label_for_max(&self.classes, &proba)
    }

    fn predict_proba(&self, features: &[f64]) -> std::result::Result<Vec<f64>, InferenceError> {
        check_features(self.n_features, features)?;

        let mut totals = vec![0.0; self.classes.len()];
        for tree in &self.estimators {
            for (total, p) in totals.iter_mut().zip(tree.leaf_distribution(features)) {
                *total += p;
            }
        }
        let n = self.estimators.len() as f64;
        Ok(totals.into_iter().map(|t| t / n).collect())
    }

    fn class_labels(&self) -> Option<&[ClassLabel]> {
        Some(&self.classes)
    }
}
