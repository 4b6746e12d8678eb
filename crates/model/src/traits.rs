//! Core traits for inference.
//!
//! The predictor only ever talks to models through these two traits, so the
//! feature contract can be tested with stubs and the storage format can change
//! without touching it.

use crate::error::{EncodeError, InferenceError};
use crate::label::ClassLabel;

/// A trained classifier.
///
/// ## Design Note
/// - `Send + Sync` lets a loaded model sit behind an `Arc` for the whole session
/// - Every method takes `&self`: a loaded model is never mutated
pub trait Classifier: Send + Sync {
    /// Runtime type name, shown in the model information panel
    fn type_name(&self) -> &str;

    /// Predict the label for one feature vector.
    fn predict(&self, features: &[f64]) -> Result<ClassLabel, InferenceError>;

    /// Class probabilities for one feature vector, ordered like `class_labels`.
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError>;

    /// Ordered labels the model was trained on, if it records them.
    fn class_labels(&self) -> Option<&[ClassLabel]> {
        None
    }
}

/// A categorical encoder mapping category strings to integer codes.
pub trait CategoricalEncoder: Send + Sync {
    /// Runtime type name, shown in the model information panel
    fn type_name(&self) -> &str;

    /// Known categories in code order, if the encoder exposes them.
    fn known_categories(&self) -> Option<&[String]>;

    /// Code for a category.
    fn transform(&self, category: &str) -> Result<i64, EncodeError>;

    /// Category for a code, if the encoder supports the reverse direction.
    fn inverse_transform(&self, _code: i64) -> Option<&str> {
        None
    }
}
