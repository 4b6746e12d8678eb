//! In-memory models for bestseller inference.
//!
//! This crate provides the two capability sets the predictor relies on and
//! the concrete implementations that can be loaded from artifacts:
//! - `Classifier` for anything with predict / predict-probability
//! - `CategoricalEncoder` for string <-> integer code mappings
//!
//! ## Implementations
//! - `LogisticRegression` (binary and multinomial)
//! - `DecisionTreeClassifier` and `RandomForestClassifier`
//! - `LabelEncoder` and `CategoryMap`
//!
//! ## Example Usage
//! ```ignore
//! use model::{Classifier, LabelEncoder, CategoricalEncoder};
//!
//! let encoder = LabelEncoder::new(vec!["Fiction".into(), "Romance".into()])?;
//! let code = encoder.transform("Romance")?;
//!
//! let proba = classifier.predict_proba(&[9.99, 4.0, 100.0, 0.0, code as f64])?;
//! ```

pub mod error;
pub mod label;
pub mod traits;
pub mod encoders;
pub mod linear;
pub mod tree;

pub use error::{EncodeError, InferenceError, ModelError, Result};
pub use label::ClassLabel;
pub use traits::{CategoricalEncoder, Classifier};
pub use encoders::{CategoryMap, LabelEncoder};
pub use linear::LogisticRegression;
pub use tree::{DecisionTreeClassifier, RandomForestClassifier, Tree, TreeArrays};

/// Check that a feature slice has the width the model was trained on and
/// contains only finite values.
pub(crate) fn check_features(
    expected: usize,
    features: &[f64],
) -> std::result::Result<(), InferenceError> {
    if features.len() != expected {
        return Err(InferenceError::FeatureShape {
            expected,
            found: features.len(),
        });
    }
    if let Some(index) = features.iter().position(|v| !v.is_finite()) {
        return Err(InferenceError::NonFiniteFeature { index });
    }
    Ok(())
}

/// Pick the label with the highest probability. Ties go to the lowest index,
/// matching argmax semantics of the training library.
pub(crate) fn label_for_max(
    classes: &[ClassLabel],
    proba: &[f64],
) -> std::result::Result<ClassLabel, InferenceError> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &p) in proba.iter().enumerate() {
        match best {
            Some((_, bp)) if p <= bp => {}
            _ => best = Some((i, p)),
        }
    }
    best.and_then(|(i, _)| classes.get(i).cloned())
        .ok_or(InferenceError::EmptyDistribution)
}
