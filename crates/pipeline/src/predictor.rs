//! Running a prediction for one book.
//!
//! `Predictor` holds the loaded artifacts for the session; every call to
//! `predict` builds a fresh feature vector, scores it and returns a
//! `PredictionReport` ready for display.

use crate::error::PredictionError;
use crate::features::{BookInput, FeatureEncoder, FeatureVector};
use crate::verdict::{Verdict, VerdictPolicy};
use artifacts::ArtifactSet;
use model::ClassLabel;
use std::sync::Arc;
use tracing::{debug, info};

/// Class probabilities for a binary model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityDisplay {
    /// Probability of class 1
    pub bestseller: f64,
    /// Probability of class 0
    pub not_bestseller: f64,
}

impl ProbabilityDisplay {
    /// Only a two-entry distribution can be displayed.
    pub fn from_distribution(proba: &[f64]) -> Option<Self> {
        match proba {
            [p0, p1] => Some(Self {
                bestseller: *p1,
                not_bestseller: *p0,
            }),
            _ => None,
        }
    }

    pub fn bestseller_percent(&self) -> String {
        format_percent(self.bestseller)
    }

    pub fn not_bestseller_percent(&self) -> String {
        format_percent(self.not_bestseller)
    }
}

fn format_percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// Everything the renderer needs after a successful prediction
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionReport {
    pub features: FeatureVector,
    pub label: ClassLabel,
    pub verdict: Verdict,
    /// `None` when the model didn't return exactly two probabilities
    pub probabilities: Option<ProbabilityDisplay>,
}

impl PredictionReport {
    pub fn verdict_message(&self) -> &'static str {
        self.verdict.message()
    }
}

/// Scores books against the session's artifacts.
#[derive(Clone)]
pub struct Predictor {
    artifacts: Arc<ArtifactSet>,
    encoder: FeatureEncoder,
    policy: VerdictPolicy,
}

impl Predictor {
    pub fn new(artifacts: Arc<ArtifactSet>) -> Self {
        let encoder = FeatureEncoder::from_artifacts(&artifacts);
        Self {
            artifacts,
            encoder,
            policy: VerdictPolicy::default(),
        }
    }

    /// Builder-style override of the verdict policy
    pub fn with_policy(mut self, policy: VerdictPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> VerdictPolicy {
        self.policy
    }

    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    /// The feature vector `predict` would score for this input.
    pub fn features(&self, input: &BookInput) -> FeatureVector {
        self.encoder.encode(input)
    }

    /// Encode the input and score it.
    pub fn predict(&self, input: &BookInput) -> Result<PredictionReport, PredictionError> {
        let features = self.features(input);
        self.predict_vector(features)
    }

    /// Score an already-encoded vector.
    ///
    /// ## Algorithm
    /// 1. `predict` for the label, `predict_proba` for the distribution
    /// 2. Label -> verdict through the active policy
    /// 3. Probabilities are displayed only for a two-class distribution
    pub fn predict_vector(&self, features: FeatureVector) -> Result<PredictionReport, PredictionError> {
        debug!("Scoring feature vector {:?}", features.values());

        let classifier = &self.artifacts.classifier;
        let label = classifier.predict(features.as_slice())?;
        let proba = classifier.predict_proba(features.as_slice())?;

        let verdict = self.policy.classify(&label);
        let probabilities = ProbabilityDisplay::from_distribution(&proba);
        if probabilities.is_none() {
            debug!(
                "Skipping probability display: expected 2 classes, got {}",
                proba.len()
            );
        }

        info!("Predicted label {} ({})", label, verdict);
        Ok(PredictionReport {
            features,
            label,
            verdict,
            probabilities,
        })
    }
}
