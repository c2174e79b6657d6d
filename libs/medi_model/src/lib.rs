//! Classifier backends for Medi risk triage.
//!
//! A trained classifier is shipped as a JSON artifact (metadata, expected
//! feature columns, backend parameters). [`load_artifact`] reads it once and
//! returns a loaded [`ModelBackend`] that maps an `input` tensor to `class`
//! and `probabilities` output tensors.

pub mod artifact;
pub mod backend;
pub mod backends;
pub mod metadata;

pub use artifact::{load_artifact, load_artifact_bytes, LoadedModel};
pub use backend::{BackendError, ModelBackend, Tensor, CLASS, INPUT, PROBABILITIES};
pub use backends::{SoftmaxLinearBackend, TreeEnsembleBackend};
pub use metadata::{ModelMetadata, ModelType, ModelVersion};
