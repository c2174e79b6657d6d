//! Pluggable backend trait and error types for classifier inference

use crate::metadata::ModelMetadata;
use std::collections::HashMap;
use thiserror::Error;

/// Name of the feature tensor passed to [`ModelBackend::infer`].
pub const INPUT: &str = "input";
/// Output tensor holding the predicted class index, shape `[1]`.
pub const CLASS: &str = "class";
/// Output tensor holding per-class scores, shape `[n_classes]`.
pub const PROBABILITIES: &str = "probabilities";

/// Errors that can occur during backend operations
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Model loading failed: {0}")]
    LoadError(String),
    #[error("Inference failed: {0}")]
    InferenceError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),
}

/// Tensor data wrapper for inputs/outputs
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    pub name: String,
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl Tensor {
    pub fn new(name: String, shape: Vec<usize>, data: Vec<f32>) -> Result<Self, BackendError> {
        let expected_size: usize = shape.iter().product();
        if data.len() != expected_size {
            return Err(BackendError::InvalidInput(format!(
                "Tensor {} data length {} does not match shape {:?} (expected {})",
                name,
                data.len(),
                shape,
                expected_size
            )));
        }
        Ok(Self { name, shape, data })
    }

    /// 1-D tensor over `data`.
    pub fn vector(name: &str, data: Vec<f32>) -> Self {
        Self {
            name: name.to_string(),
            shape: vec![data.len()],
            data,
        }
    }
}

/// Pluggable backend trait for classifier inference
///
/// Backends are loaded once and then only read, so a loaded backend can be
/// shared across request handlers.
pub trait ModelBackend: Send + Sync {
    /// Load backend parameters from their serialized form
    fn load_model(
        &mut self,
        model_bytes: &[u8],
        metadata: &ModelMetadata,
    ) -> Result<(), BackendError>;

    /// Run inference; expects an [`INPUT`] tensor and yields [`CLASS`] and
    /// [`PROBABILITIES`].
    fn infer(
        &self,
        inputs: HashMap<String, Tensor>,
    ) -> Result<HashMap<String, Tensor>, BackendError>;

    /// Get backend name/identifier
    fn backend_name(&self) -> &str;

    /// Whether parameters have been loaded
    fn is_loaded(&self) -> bool;

    /// Width of the [`INPUT`] tensor the loaded parameters expect.
    fn n_features(&self) -> Option<usize>;
}

/// Pull the 1-D input tensor out of an inference request and check its width.
pub(crate) fn take_input(
    inputs: &mut HashMap<String, Tensor>,
    n_features: usize,
) -> Result<Vec<f32>, BackendError> {
    let input = inputs
        .remove(INPUT)
        .ok_or_else(|| BackendError::InvalidInput(format!("missing '{INPUT}' tensor")))?;
    if input.shape.len() != 1 {
        return Err(BackendError::InvalidInput("input must be 1-D".into()));
    }
    if input.data.len() != n_features {
        return Err(BackendError::InvalidInput(format!(
            "input length {} != feature count {}",
            input.data.len(),
            n_features
        )));
    }
    if input.data.iter().any(|x| !x.is_finite()) {
        return Err(BackendError::InvalidInput("input contains non-finite values".into()));
    }
    Ok(input.data)
}

/// Build the standard `{class, probabilities}` output map. Ties resolve to the
/// lowest class index.
pub(crate) fn classification_output(probabilities: Vec<f32>) -> HashMap<String, Tensor> {
    let mut best = 0;
    for (i, p) in probabilities.iter().enumerate() {
        if *p > probabilities[best] {
            best = i;
        }
    }
    let mut out = HashMap::new();
    out.insert(CLASS.to_string(), Tensor::vector(CLASS, vec![best as f32]));
    out.insert(
        PROBABILITIES.to_string(),
        Tensor::vector(PROBABILITIES, probabilities),
    );
    out
}
