//! On-disk artifact documents.
//!
//! Each artifact is a JSON object tagged by `"type"`. These structs mirror
//! the files exactly; `into_model` / `into_encoder` turn them into validated
//! in-memory objects.
//!
//! ```json
//! { "type": "label_encoder", "classes": ["Literature & Fiction", "Romance"] }
//! ```

use model::{
    CategoricalEncoder, CategoryMap, ClassLabel, Classifier, DecisionTreeClassifier, LabelEncoder,
    LogisticRegression, ModelError, RandomForestClassifier, TreeArrays,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Classifier artifact document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression {
        classes: Vec<ClassLabel>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
    DecisionTree {
        classes: Vec<ClassLabel>,
        n_features: usize,
        tree: TreeArrays,
    },
    RandomForest {
        classes: Vec<ClassLabel>,
        n_features: usize,
        estimators: Vec<TreeArrays>,
    },
}

impl ClassifierArtifact {
    pub fn into_model(self) -> Result<Arc<dyn Classifier>, ModelError> {
        let model: Arc<dyn Classifier> = match self {
            ClassifierArtifact::LogisticRegression {
                classes,
                coef,
                intercept,
            } => Arc::new(LogisticRegression::new(classes, coef, intercept)?),
            ClassifierArtifact::DecisionTree {
                classes,
                n_features,
                tree,
            } => Arc::new(DecisionTreeClassifier::new(classes, n_features, tree)?),
            ClassifierArtifact::RandomForest {
                classes,
                n_features,
                estimators,
            } => Arc::new(RandomForestClassifier::new(classes, n_features, estimators)?),
        };
        Ok(model)
    }
}

/// Categorical encoder artifact document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EncoderArtifact {
    /// Code is the position in `classes`
    LabelEncoder { classes: Vec<String> },
    /// Explicit category -> code table
    CategoryMap { mapping: BTreeMap<String, i64> },
}

impl EncoderArtifact {
    pub fn into_encoder(self) -> Result<Arc<dyn CategoricalEncoder>, ModelError> {
        let encoder: Arc<dyn CategoricalEncoder> = match self {
            EncoderArtifact::LabelEncoder { classes } => Arc::new(LabelEncoder::new(classes)?),
            EncoderArtifact::CategoryMap { mapping } => Arc::new(CategoryMap::new(mapping)?),
        };
        Ok(encoder)
    }
}

/// Runtime type names of a loaded artifact set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    pub model_type: String,
    pub main_encoder_type: String,
    pub sub_encoder_type: String,
}
