//! Integration tests for the pipeline.
//!
//! These tests verify that feature encoding, the classifier and the verdict
//! policy work together, using stub classifiers and the sample artifacts.

use artifacts::{ArtifactPaths, ArtifactSet};
use model::{CategoricalEncoder, ClassLabel, Classifier, InferenceError, LabelEncoder};
use pipeline::{BookInput, FeatureVector, GenreOptions, Predictor, Verdict, VerdictPolicy, PREDICTION_HINT};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Classifier with canned answers that records the vectors it was given.
struct StubClassifier {
    label: ClassLabel,
    proba: Vec<f64>,
    seen: Mutex<Vec<Vec<f64>>>,
}

impl StubClassifier {
    fn new(label: ClassLabel, proba: Vec<f64>) -> Self {
        Self {
            label,
            proba,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Classifier for StubClassifier {
    fn type_name(&self) -> &str {
        "StubClassifier"
    }

    fn predict(&self, features: &[f64]) -> Result<ClassLabel, InferenceError> {
        self.seen.lock().unwrap().push(features.to_vec());
        Ok(self.label.clone())
    }

    fn predict_proba(&self, _features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        Ok(self.proba.clone())
    }
}

/// Classifier trained on a different feature layout.
struct WideClassifier;

impl Classifier for WideClassifier {
    fn type_name(&self) -> &str {
        "WideClassifier"
    }

    fn predict(&self, features: &[f64]) -> Result<ClassLabel, InferenceError> {
        Err(InferenceError::FeatureShape {
            expected: 7,
            found: features.len(),
        })
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        Err(InferenceError::FeatureShape {
            expected: 7,
            found: features.len(),
        })
    }
}

fn main_encoder() -> Arc<dyn CategoricalEncoder> {
    Arc::new(
        LabelEncoder::new(vec![
            "Arts, Film & Photography".to_string(),
            "Biographies, Diaries & True Accounts".to_string(),
            "Literature & Fiction".to_string(),
            "Sports".to_string(),
        ])
        .unwrap(),
    )
}

fn sub_encoder() -> Arc<dyn CategoricalEncoder> {
    Arc::new(
        LabelEncoder::new(vec![
            "Crime, Thriller & Mystery".to_string(),
            "Fantasy".to_string(),
            "Poetry".to_string(),
            "Romance".to_string(),
        ])
        .unwrap(),
    )
}

fn artifacts_with(classifier: Arc<dyn Classifier>) -> Arc<ArtifactSet> {
    Arc::new(ArtifactSet::new(classifier, main_encoder(), sub_encoder()))
}

fn default_input() -> BookInput {
    BookInput::new(9.99, 4.0, 100, "Literature & Fiction", "Romance").unwrap()
}

#[test]
fn test_default_scenario() {
    let stub = Arc::new(StubClassifier::new(ClassLabel::Int(1), vec![0.2, 0.8]));
    let predictor = Predictor::new(artifacts_with(stub.clone()));

    let report = predictor.predict(&default_input()).unwrap();

    assert_eq!(report.features.values(), [9.99, 4.0, 100.0, 2.0, 3.0]);
    assert_eq!(stub.seen.lock().unwrap().as_slice(), &[vec![9.99, 4.0, 100.0, 2.0, 3.0]]);

    assert_eq!(report.verdict, Verdict::Bestseller);
    assert_eq!(report.verdict.headline(), "BESTSELLER");

    let probabilities = report.probabilities.unwrap();
    assert_eq!(probabilities.bestseller_percent(), "80.00%");
    assert_eq!(probabilities.not_bestseller_percent(), "20.00%");
}

#[test]
fn test_unknown_genres_encode_to_zero() {
    let stub = Arc::new(StubClassifier::new(ClassLabel::Int(0), vec![0.9, 0.1]));
    let predictor = Predictor::new(artifacts_with(stub));

    let input = BookInput::new(20.0, 3.5, 40, "Cookbooks", "Baking").unwrap();
    let first = predictor.features(&input);
    let second = predictor.features(&input);

    assert_eq!(first, FeatureVector::new(20.0, 3.5, 40, 0, 0));
    assert_eq!(first, second);

    let report = predictor.predict(&input).unwrap();
    assert_eq!(report.verdict, Verdict::NotBestseller);
}

#[test]
fn test_vector_always_has_five_values_in_order() {
    let predictor = Predictor::new(artifacts_with(Arc::new(StubClassifier::new(
        ClassLabel::Int(0),
        vec![0.5, 0.5],
    ))));
    let options = GenreOptions::from_artifacts(Some(predictor.artifacts()));

    for (m, main) in options.main.iter().enumerate() {
        for (s, sub) in options.sub.iter().enumerate() {
            for &(price, rating, reviews) in &[(0.0, 0.0, 0u32), (9.99, 4.0, 100), (120.5, 5.0, 250_000)] {
                let input = BookInput::new(price, rating, reviews, main.as_str(), sub.as_str()).unwrap();
                let values = predictor.features(&input).values();
                assert_eq!(values.len(), 5);
                assert_eq!(values, [price, rating, reviews as f64, m as f64, s as f64]);
            }
        }
    }
}

#[test]
fn test_text_labels() {
    let cases = [
        ("Bestseller", Verdict::Bestseller),
        ("Not Bestseller", Verdict::NotBestseller),
        ("Regular", Verdict::NotBestseller),
    ];
    for (label, expected) in cases {
        let stub = Arc::new(StubClassifier::new(ClassLabel::Text(label.to_string()), vec![0.4, 0.6]));
        let report = Predictor::new(artifacts_with(stub)).predict(&default_input()).unwrap();
        assert_eq!(report.verdict, expected, "label {:?}", label);
    }
}

#[test]
fn test_substring_policy_flags_negated_label_as_bestseller() {
    let stub = Arc::new(StubClassifier::new(
        ClassLabel::Text("Not Bestseller".to_string()),
        vec![0.7, 0.3],
    ));
    let predictor = Predictor::new(artifacts_with(stub)).with_policy(VerdictPolicy::Substring);

    let report = predictor.predict(&default_input()).unwrap();
    assert_eq!(report.verdict, Verdict::Bestseller);
}

#[test]
fn test_non_binary_distribution_skips_probabilities() {
    let stub = Arc::new(StubClassifier::new(ClassLabel::Int(1), vec![0.1, 0.2, 0.7]));
    let report = Predictor::new(artifacts_with(stub)).predict(&default_input()).unwrap();

    assert_eq!(report.verdict, Verdict::Bestseller);
    assert!(report.probabilities.is_none());
}

#[test]
fn test_shape_mismatch_is_reported_not_fatal() {
    let predictor = Predictor::new(artifacts_with(Arc::new(WideClassifier)));

    let err = predictor.predict(&default_input()).unwrap_err();
    assert!(err.to_string().contains("Expected 7 features but found 5"));
    assert_eq!(err.hint(), PREDICTION_HINT);

    // Still usable for the next request
    assert!(predictor.predict(&default_input()).is_err());
}

#[test]
fn test_sample_artifacts_end_to_end() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../artifacts");
    let set = Arc::new(ArtifactSet::load_from_paths(&ArtifactPaths::in_dir(&dir)).unwrap());
    let predictor = Predictor::new(set);

    // Few reviews, average rating
    let report = predictor.predict(&default_input()).unwrap();
    assert_eq!(report.features.values(), [9.99, 4.0, 100.0, 5.0, 7.0]);
    assert_eq!(report.verdict, Verdict::NotBestseller);

    // Many reviews and a strong rating
    let input = BookInput::new(12.0, 4.7, 5000, "Literature & Fiction", "Romance").unwrap();
    let report = predictor.predict(&input).unwrap();
    assert_eq!(report.label, ClassLabel::Int(1));
    assert_eq!(report.verdict, Verdict::Bestseller);

    let p = report.probabilities.unwrap();
    assert!((p.bestseller + p.not_bestseller - 1.0).abs() < 1e-9);
}
