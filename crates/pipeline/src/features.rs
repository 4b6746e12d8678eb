//! Feature encoding for bestseller prediction.
//!
//! This module turns raw form input into the numeric vector the classifier
//! was trained on. The vector layout is fixed:
//!
//! | index | feature             |
//! |-------|---------------------|
//! | 0     | price               |
//! | 1     | rating              |
//! | 2     | number of ratings   |
//! | 3     | main genre code     |
//! | 4     | sub genre code      |

use crate::error::InputError;
use artifacts::ArtifactSet;
use model::CategoricalEncoder;
use std::sync::Arc;
use tracing::debug;

/// Code substituted for any genre the encoder doesn't know.
pub const FALLBACK_CODE: i64 = 0;

pub const FALLBACK_MAIN_GENRE: &str = "Literature & Fiction";
pub const FALLBACK_SUB_GENRE: &str = "Romance";

pub const DEFAULT_PRICE: f64 = 9.99;
pub const DEFAULT_RATING: f64 = 4.0;
pub const DEFAULT_REVIEW_COUNT: u32 = 100;

pub const MAX_RATING: f64 = 5.0;

/// Width of the classifier input
pub const FEATURE_COUNT: usize = 5;

/// Column names in training order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Price",
    "Rating",
    "No. of People rated",
    "Main Genre",
    "Sub Genre",
];

/// Validated form input for one book.
#[derive(Debug, Clone, PartialEq)]
pub struct BookInput {
    price: f64,
    rating: f64,
    review_count: u32,
    main_genre: String,
    sub_genre: String,
}

impl BookInput {
    /// Validate raw form values.
    ///
    /// The rating snaps to the nearest 0.1, the resolution of the rating
    /// control.
    pub fn new(
        price: f64,
        rating: f64,
        review_count: u32,
        main_genre: impl Into<String>,
        sub_genre: impl Into<String>,
    ) -> Result<Self, InputError> {
        if !price.is_finite() || price < 0.0 {
            return Err(InputError::InvalidPrice(price));
        }
        if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
            return Err(InputError::InvalidRating(rating));
        }

        Ok(Self {
            price,
            rating: (rating * 10.0).round() / 10.0,
            review_count,
            main_genre: main_genre.into(),
            sub_genre: sub_genre.into(),
        })
    }

    /// Default form values with the given genres selected.
    pub fn with_genres(main_genre: impl Into<String>, sub_genre: impl Into<String>) -> Self {
        Self {
            price: DEFAULT_PRICE,
            rating: DEFAULT_RATING,
            review_count: DEFAULT_REVIEW_COUNT,
            main_genre: main_genre.into(),
            sub_genre: sub_genre.into(),
        }
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn review_count(&self) -> u32 {
        self.review_count
    }

    pub fn main_genre(&self) -> &str {
        &self.main_genre
    }

    pub fn sub_genre(&self) -> &str {
        &self.sub_genre
    }
}

impl Default for BookInput {
    fn default() -> Self {
        Self::with_genres(FALLBACK_MAIN_GENRE, FALLBACK_SUB_GENRE)
    }
}

/// The classifier input: exactly five values in training order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(price: f64, rating: f64, review_count: u32, main_code: i64, sub_code: i64) -> Self {
        Self([
            price,
            rating,
            f64::from(review_count),
            main_code as f64,
            sub_code as f64,
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        self.0
    }
}

/// Selectable options for a genre field.
///
/// Uses the encoder's vocabulary when it exposes a non-empty one, otherwise a
/// single fallback option.
pub fn genre_options(encoder: Option<&dyn CategoricalEncoder>, fallback: &str) -> Vec<String> {
    match encoder.and_then(|e| e.known_categories()) {
        Some(categories) if !categories.is_empty() => categories.to_vec(),
        _ => vec![fallback.to_string()],
    }
}

/// Encode a genre, falling back to `FALLBACK_CODE` on any failure.
pub fn encode_genre(encoder: &dyn CategoricalEncoder, genre: &str) -> i64 {
    match encoder.transform(genre) {
        Ok(code) => code,
        Err(e) => {
            debug!(
                "{} could not encode {:?} ({}); using code {}",
                encoder.type_name(),
                genre,
                e,
                FALLBACK_CODE
            );
            FALLBACK_CODE
        }
    }
}

/// Option lists for both genre fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreOptions {
    pub main: Vec<String>,
    pub sub: Vec<String>,
}

impl GenreOptions {
    pub fn from_artifacts(artifacts: Option<&ArtifactSet>) -> Self {
        Self {
            main: genre_options(
                artifacts.map(|a| &*a.main_genre_encoder),
                FALLBACK_MAIN_GENRE,
            ),
            sub: genre_options(
                artifacts.map(|a| &*a.sub_genre_encoder),
                FALLBACK_SUB_GENRE,
            ),
        }
    }

    /// Default input with the first option of each list selected.
    pub fn default_input(&self) -> BookInput {
        BookInput::with_genres(
            self.main.first().map(String::as_str).unwrap_or(FALLBACK_MAIN_GENRE),
            self.sub.first().map(String::as_str).unwrap_or(FALLBACK_SUB_GENRE),
        )
    }
}

/// Builds feature vectors from form input.
#[derive(Clone)]
pub struct FeatureEncoder {
    main_genre: Arc<dyn CategoricalEncoder>,
    sub_genre: Arc<dyn CategoricalEncoder>,
}

impl FeatureEncoder {
    pub fn new(main_genre: Arc<dyn CategoricalEncoder>, sub_genre: Arc<dyn CategoricalEncoder>) -> Self {
        Self {
            main_genre,
            sub_genre,
        }
    }

    pub fn from_artifacts(artifacts: &ArtifactSet) -> Self {
        Self::new(
            Arc::clone(&artifacts.main_genre_encoder),
            Arc::clone(&artifacts.sub_genre_encoder),
        )
    }

    pub fn encode(&self, input: &BookInput) -> FeatureVector {
        let main_code = encode_genre(self.main_genre.as_ref(), input.main_genre());
        let sub_code = encode_genre(self.sub_genre.as_ref(), input.sub_genre());
        FeatureVector::new(input.price(), input.rating(), input.review_count(), main_code, sub_code)
    }
}
