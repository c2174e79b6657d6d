//! On-disk classifier artifacts.
//!
//! ```json
//! {
//!   "metadata": { "id": "vitals-risk", "name": "Vitals risk", "version": "1.0.0" },
//!   "feature_names": ["age", "gender", "..."],
//!   "backend": { "kind": "softmax_linear", "weights": [[...]], "intercepts": [...] }
//! }
//! ```

use crate::backend::{BackendError, ModelBackend};
use crate::backends::backend_for_kind;
use crate::metadata::{ModelMetadata, ModelType};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ArtifactFile {
    metadata: ModelMetadata,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    backend: serde_json::Value,
}

/// A classifier ready for inference, together with its metadata.
pub struct LoadedModel {
    pub metadata: ModelMetadata,
    pub feature_names: Option<Vec<String>>,
    pub backend: Box<dyn ModelBackend>,
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("metadata", &self.metadata)
            .field("feature_names", &self.feature_names)
            .field("backend", &self.backend.backend_name())
            .finish()
    }
}

/// Read and load an artifact from `path`.
///
/// When `expected_features` is given and the artifact declares
/// `feature_names`, both must match exactly, in order.
pub fn load_artifact(
    path: impl AsRef<Path>,
    expected_features: Option<&[&str]>,
) -> Result<LoadedModel, BackendError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| BackendError::LoadError(format!("{}: {e}", path.display())))?;
    let model = load_artifact_bytes(&bytes, expected_features)?;
    log::info!(
        "loaded model {} v{} ({}) from {}",
        model.metadata.id,
        model.metadata.version,
        model.backend.backend_name(),
        path.display()
    );
    Ok(model)
}

/// Load an artifact already held in memory.
pub fn load_artifact_bytes(
    bytes: &[u8],
    expected_features: Option<&[&str]>,
) -> Result<LoadedModel, BackendError> {
    let file: ArtifactFile = serde_json::from_slice(bytes)
        .map_err(|e| BackendError::LoadError(format!("malformed artifact: {e}")))?;

    if let (Some(expected), Some(declared)) = (expected_features, &file.feature_names) {
        if !declared.iter().map(String::as_str).eq(expected.iter().copied()) {
            return Err(BackendError::LoadError(format!(
                "feature_names {declared:?} do not match expected columns {expected:?}"
            )));
        }
    }

    let kind = file
        .backend
        .get("kind")
        .and_then(|k| k.as_str())
        .ok_or_else(|| BackendError::LoadError("backend.kind is missing".into()))?
        .to_string();
    let mut backend = backend_for_kind(&kind)
        .ok_or_else(|| BackendError::BackendUnavailable(format!("unknown backend kind '{kind}'")))?;

    let mut metadata = file.metadata;
    if metadata.model_type.is_none() {
        metadata = metadata.with_model_type(match kind.as_str() {
            "softmax_linear" => ModelType::SoftmaxLinear,
            "tree_ensemble" => ModelType::TreeEnsemble,
            other => ModelType::Custom(other.to_string()),
        });
    }

    let params = serde_json::to_vec(&file.backend)
        .map_err(|e| BackendError::LoadError(format!("backend parameters: {e}")))?;
    backend.load_model(&params, &metadata)?;

    let width = backend.n_features();
    let declared_width = file.feature_names.as_ref().map(Vec::len);
    for (what, expected) in [
        ("expected columns", expected_features.map(<[&str]>::len)),
        ("feature_names", declared_width),
    ] {
        if let Some(expected) = expected {
            if width != Some(expected) {
                return Err(BackendError::LoadError(format!(
                    "model takes {} inputs but {what} list {expected}",
                    width.map_or_else(|| "no".to_string(), |w| w.to_string())
                )));
            }
        }
    }

    Ok(LoadedModel {
        metadata,
        feature_names: file.feature_names,
        backend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_is_unavailable() {
        let err = load_artifact_bytes(
            br#"{"metadata":{"id":"x","name":"x"},"backend":{"kind":"onnx"}}"#,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, BackendError::BackendUnavailable(_)));
    }

    #[test]
    fn missing_kind_is_a_load_error() {
        let err = load_artifact_bytes(br#"{"metadata":{"id":"x","name":"x"},"backend":{}}"#, None)
            .unwrap_err();
        assert!(matches!(err, BackendError::LoadError(_)));
    }

    #[test]
    fn model_type_is_inferred_from_kind() {
        let model = load_artifact_bytes(
            br#"{"metadata":{"id":"x","name":"x"},
                 "backend":{"kind":"softmax_linear","weights":[[1.0],[-1.0]],"intercepts":[0.0,0.0]}}"#,
            None,
        )
        .unwrap();
        assert_eq!(model.metadata.model_type, Some(ModelType::SoftmaxLinear));
        assert!(model.backend.is_loaded());
        assert_eq!(model.backend.n_features(), Some(1));
    }

    #[test]
    fn input_width_must_match_expected_columns() {
        let narrow = br#"{"metadata":{"id":"x","name":"x"},
             "backend":{"kind":"softmax_linear","weights":[[1.0],[2.0]],"intercepts":[0.0,0.0]}}"#;
        let err = load_artifact_bytes(narrow, Some(&["age", "bmi"][..])).unwrap_err();
        assert!(matches!(err, BackendError::LoadError(_)));
        assert!(err.to_string().contains("model takes 1 inputs but expected columns list 2"));
        assert!(load_artifact_bytes(narrow, Some(&["age"][..])).is_ok());
    }

    #[test]
    fn input_width_must_match_declared_feature_names() {
        let err = load_artifact_bytes(
            br#"{"metadata":{"id":"x","name":"x"},"feature_names":["age","bmi"],
                 "backend":{"kind":"tree_ensemble","n_features":3,"n_classes":2,
                            "trees":[{"nodes":[{"class":0}]}]}}"#,
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("feature_names list 2"));
    }
}
