//! Reading artifact files.
//!
//! - classifier: one `ClassifierArtifact` document
//! - main / sub genre encoder: one `EncoderArtifact` document each

use crate::error::{ArtifactLoadError, Result};
use crate::types::{ClassifierArtifact, EncoderArtifact};
use model::{CategoricalEncoder, Classifier};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Open and deserialize one JSON document.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ArtifactLoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => ArtifactLoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        if e.is_io() {
            ArtifactLoadError::Io {
                path: path.to_path_buf(),
                source: e.into(),
            }
        } else {
            ArtifactLoadError::Corrupt {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Load the classifier artifact
pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>> {
    let artifact: ClassifierArtifact = read_document(path)?;
    let model = artifact
        .into_model()
        .map_err(|source| ArtifactLoadError::Incompatible {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Loaded {} from {}", model.type_name(), path.display());
    Ok(model)
}

/// Load a categorical encoder artifact
pub fn load_encoder(path: &Path) -> Result<Arc<dyn CategoricalEncoder>> {
    let artifact: EncoderArtifact = read_document(path)?;
    let encoder = artifact
        .into_encoder()
        .map_err(|source| ArtifactLoadError::Incompatible {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Loaded {} from {}", encoder.type_name(), path.display());
    Ok(encoder)
}
