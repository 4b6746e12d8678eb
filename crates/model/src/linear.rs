//! Logistic regression.

use crate::error::{InferenceError, ModelError, Result};
use crate::label::ClassLabel;
use crate::traits::Classifier;
use crate::{check_features, label_for_max};

/// Linear classifier with a logistic (binary) or softmax (multinomial) link.
///
/// ## Layout
/// - Binary: one coefficient row and one intercept; the row scores class 1
/// - Multinomial: one row and one intercept per class
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    classes: Vec<ClassLabel>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    n_features: usize,
}

impl LogisticRegression {
    pub fn new(classes: Vec<ClassLabel>, coef: Vec<Vec<f64>>, intercept: Vec<f64>) -> Result<Self> {
        const MODEL: &str = "LogisticRegression";

        if classes.len() < 2 {
            return Err(ModelError::invalid(MODEL, "at least two classes are required"));
        }
        let expected_rows = if classes.len() == 2 { 1 } else { classes.len() };
        if coef.len() != expected_rows {
            return Err(ModelError::invalid(
                MODEL,
                format!("expected {} coefficient rows for {} classes, found {}", expected_rows, classes.len(), coef.len()),
            ));
        }
        if intercept.len() != expected_rows {
            return Err(ModelError::invalid(
                MODEL,
                format!("expected {} intercepts, found {}", expected_rows, intercept.len()),
            ));
        }
        let n_features = coef[0].len();
        if n_features == 0 || coef.iter().any(|row| row.len() != n_features) {
            return Err(ModelError::invalid(MODEL, "coefficient rows must be non-empty and of equal width"));
        }

        Ok(Self {
            classes,
            coef,
            intercept,
            n_features,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    fn decision(&self, row: usize, features: &[f64]) -> f64 {
        self.coef[row]
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept[row]
    }
}

impl Classifier for LogisticRegression {
    fn type_name(&self) -> &str {
        "LogisticRegression"
    }

    fn predict(&self, features: &[f64]) -> std::result::Result<ClassLabel, InferenceError> {
        let proba = self.predict_proba(features)?;
        label_for_max(&self.classes, &proba)
    }

    fn predict_proba(&self, features: &[f64]) -> std::result::Result<Vec<f64>, InferenceError> {
        check_features(self.n_features, features)?;

        let scores = (0..self.coef.len())
            .map(|row| match self.decision(row, features) {
                score if score.is_finite() => Ok(score),
                _ => Err(InferenceError::NonFiniteScore { row }),
            })
            .collect::<std::result::Result<Vec<f64>, _>>()?;

        if self.classes.len() == 2 {
            let p1 = sigmoid(scores[0]);
            return Ok(vec![1.0 - p1, p1]);
        }
        Ok(softmax(&scores))
    }

    fn class_labels(&self) -> Option<&[ClassLabel]> {
        Some(&self.classes)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
