//! Loading and caching the artifact set.
//!
//! The three artifacts are read once, in parallel, and then shared read-only
//! for the rest of the session through an `ArtifactStore`.

use crate::error::Result;
use crate::loader;
use crate::types::ModelInfo;
use model::{CategoricalEncoder, Classifier};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tracing::{error, info};

pub const DEFAULT_MODEL_FILE: &str = "amazon_books_model.json";
pub const DEFAULT_MAIN_ENCODER_FILE: &str = "main_genre_encoder.json";
pub const DEFAULT_SUB_ENCODER_FILE: &str = "sub_genre_encoder.json";

/// Locations of the three artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub main_encoder: PathBuf,
    pub sub_encoder: PathBuf,
}

impl ArtifactPaths {
    pub fn new(
        model: impl Into<PathBuf>,
        main_encoder: impl Into<PathBuf>,
        sub_encoder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            model: model.into(),
            main_encoder: main_encoder.into(),
            sub_encoder: sub_encoder.into(),
        }
    }

    /// The default file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            dir.join(DEFAULT_MODEL_FILE),
            dir.join(DEFAULT_MAIN_ENCODER_FILE),
            dir.join(DEFAULT_SUB_ENCODER_FILE),
        )
    }
}

/// The loaded classifier and genre encoders.
#[derive(Clone)]
pub struct ArtifactSet {
    pub classifier: Arc<dyn Classifier>,
    pub main_genre_encoder: Arc<dyn CategoricalEncoder>,
    pub sub_genre_encoder: Arc<dyn CategoricalEncoder>,
}

impl ArtifactSet {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        main_genre_encoder: Arc<dyn CategoricalEncoder>,
        sub_genre_encoder: Arc<dyn CategoricalEncoder>,
    ) -> Self {
        Self {
            classifier,
            main_genre_encoder,
            sub_genre_encoder,
        }
    }

    /// Load all three artifacts.
    ///
    /// The files are independent, so they're read in parallel with nested
    /// `rayon::join` calls. The first failure wins.
    pub fn load_from_paths(paths: &ArtifactPaths) -> Result<Self> {
        let start = Instant::now();

        let (classifier, (main_genre_encoder, sub_genre_encoder)) = rayon::join(
            || loader::load_classifier(&paths.model),
            || {
                rayon::join(
                    || loader::load_encoder(&paths.main_encoder),
                    || loader::load_encoder(&paths.sub_encoder),
                )
            },
        );

        let set = Self::new(classifier?, main_genre_encoder?, sub_genre_encoder?);
        info!(
            "Loaded {} with {} / {} in {:?}",
            set.classifier.type_name(),
            set.main_genre_encoder.type_name(),
            set.sub_genre_encoder.type_name(),
            start.elapsed()
        );
        Ok(set)
    }

    /// Runtime type names, for the model information panel
    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            model_type: self.classifier.type_name().to_string(),
            main_encoder_type: self.main_genre_encoder.type_name().to_string(),
            sub_encoder_type: self.sub_genre_encoder.type_name().to_string(),
        }
    }
}

/// Load-once cache for an `ArtifactSet`.
///
/// Construct one per session and hand the resulting `Arc<ArtifactSet>` to
/// whatever needs it. Only a successful load is cached; a failed load is
/// retried on the next call.
pub struct ArtifactStore {
    paths: ArtifactPaths,
    cached: OnceLock<Arc<ArtifactSet>>,
}

impl ArtifactStore {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self {
            paths,
            cached: OnceLock::new(),
        }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// The cached set, reading storage only on the first successful call.
    pub fn load(&self) -> Result<Arc<ArtifactSet>> {
        if let Some(set) = self.cached.get() {
            return Ok(Arc::clone(set));
        }
        let set = Arc::new(ArtifactSet::load_from_paths(&self.paths)?);
        Ok(Arc::clone(self.cached.get_or_init(|| set)))
    }

    /// Like `load`, but logs the failure and returns `None` instead.
    pub fn load_or_report(&self) -> Option<Arc<ArtifactSet>> {
        match self.load() {
            Ok(set) => Some(set),
            Err(e) => {
                error!("Error loading models: {}", e);
                None
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.get().is_some()
    }
}
