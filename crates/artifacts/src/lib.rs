//! # Artifacts Crate
//!
//! This crate loads the trained classifier and the two genre encoders from
//! disk and keeps them for the rest of the session.
//!
//! ## Main Components
//!
//! - **types**: On-disk JSON documents (`ClassifierArtifact`, `EncoderArtifact`)
//! - **loader**: Read and validate a single artifact file
//! - **store**: `ArtifactSet` (the loaded trio) and `ArtifactStore` (load-once cache)
//! - **error**: Error types for artifact loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use artifacts::{ArtifactPaths, ArtifactStore};
//! use std::path::Path;
//!
//! let store = ArtifactStore::new(ArtifactPaths::in_dir(Path::new("artifacts")));
//! let Some(set) = store.load_or_report() else {
//!     return;
//! };
//! println!("Model type: {}", set.info().model_type);
//! ```

pub mod error;
pub mod types;
pub mod loader;
pub mod store;

pub use error::{ArtifactLoadError, Result};
pub use types::{ClassifierArtifact, EncoderArtifact, ModelInfo};
pub use store::{
    ArtifactPaths, ArtifactSet, ArtifactStore, DEFAULT_MAIN_ENCODER_FILE, DEFAULT_MODEL_FILE,
    DEFAULT_SUB_ENCODER_FILE,
};
