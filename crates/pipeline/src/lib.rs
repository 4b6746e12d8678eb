//! Feature encoding and prediction for the bestseller form.
//!
//! This crate provides:
//! - BookInput and FeatureEncoder for turning form values into the model input
//! - genre option lists with single-entry fallbacks
//! - Predictor for scoring a book and building a PredictionReport
//! - VerdictPolicy for mapping predicted labels to a verdict
//!
//! ## Architecture
//! A prediction runs in stages:
//! 1. Genres are encoded (unknown genres become code 0)
//! 2. The five-value FeatureVector is assembled in training order
//! 3. The classifier returns a label and class probabilities
//! 4. The label becomes a Verdict and the probabilities percentages
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{BookInput, Predictor};
//!
//! let predictor = Predictor::new(artifacts.clone());
//! let input = BookInput::new(9.99, 4.0, 100, "Literature & Fiction", "Romance")?;
//!
//! match predictor.predict(&input) {
//!     Ok(report) => println!("{}", report.verdict_message()),
//!     Err(e) => eprintln!("{}\n{}", e, e.hint()),
//! }
//! ```

pub mod error;
pub mod features;
pub mod verdict;
pub mod predictor;

// Re-export main types
pub use error::{InputError, PredictionError, PREDICTION_HINT};
pub use features::{
    encode_genre, genre_options, BookInput, FeatureEncoder, FeatureVector, GenreOptions,
    FALLBACK_CODE, FALLBACK_MAIN_GENRE, FALLBACK_SUB_GENRE, FEATURE_NAMES,
};
pub use predictor::{PredictionReport, Predictor, ProbabilityDisplay};
pub use verdict::{Verdict, VerdictPolicy};
pub use model::{ClassLabel, InferenceError};
