//! Error types for the model crate.
//!
//! Construction problems (a model whose shapes don't line up) are kept apart
//! from inference problems (a feature vector the model can't score) so the
//! loader and the predictor can each report the one they care about.

use thiserror::Error;

/// A model or encoder could not be built from the supplied parts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The parts are structurally inconsistent
    #[error("Invalid {model}: {reason}")]
    Invalid { model: &'static str, reason: String },
}

impl ModelError {
    pub(crate) fn invalid(model: &'static str, reason: impl Into<String>) -> Self {
        ModelError::Invalid {
            model,
            reason: reason.into(),
        }
    }
}

/// Scoring a feature vector failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// The vector width differs from the one the model was trained on
    #[error("Expected {expected} features but found {found}")]
    FeatureShape { expected: usize, found: usize },

    /// NaN or infinity in the input
    #[error("Feature at position {index} is not a finite number")]
    NonFiniteFeature { index: usize },

    /// A decision score overflowed, so no distribution can be formed
    #[error("Decision score for class row {row} is not a finite number")]
    NonFiniteScore { row: usize },

    /// The model produced an empty distribution
    #[error("Classifier produced no class probabilities")]
    EmptyDistribution,
}

/// A category could not be turned into a code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    #[error("Unknown category: {0:?}")]
    UnknownCategory(String),
}

/// Convenience type alias for construction results in this crate
pub type Result<T> = std::result::Result<T, ModelError>;
