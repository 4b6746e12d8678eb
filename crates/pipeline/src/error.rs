//! Error types for the pipeline crate.

use model::InferenceError;
use thiserror::Error;

/// Shown alongside every prediction failure.
pub const PREDICTION_HINT: &str =
    "The model might expect different features. Check the model structure.";

/// A form value is outside its allowed range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Price must be a non-negative number, got {0}")]
    InvalidPrice(f64),

    #[error("Rating must be between 0.0 and 5.0, got {0}")]
    InvalidRating(f64),
}

/// The classifier could not score the feature vector.
///
/// The session stays usable after this error; the caller reports it and
/// waits for the next action.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Error making prediction: {0}")]
    Inference(#[from] InferenceError),
}

impl PredictionError {
    /// Diagnostic hint for the user
    pub fn hint(&self) -> &'static str {
        PREDICTION_HINT
    }
}
