//! Multinomial logistic regression: `softmax(W·z + b)` with optional
//! standardization `z = (x - mean) / scale`.

use crate::backend::{classification_output, take_input, BackendError, ModelBackend, Tensor};
use crate::metadata::ModelMetadata;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Params {
    /// One row per class.
    weights: Vec<Vec<f32>>,
    intercepts: Vec<f32>,
    #[serde(default)]
    scaler: Option<Scaler>,
}

impl Params {
    fn check(&self) -> Result<(), BackendError> {
        let n_classes = self.weights.len();
        if n_classes == 0 {
            return Err(BackendError::LoadError("weights must not be empty".into()));
        }
        let n_features = self.weights[0].len();
        if n_features == 0 {
            return Err(BackendError::LoadError("weight rows must not be empty".into()));
        }
        if let Some(row) = self.weights.iter().position(|r| r.len() != n_features) {
            return Err(BackendError::LoadError(format!(
                "weight row {row} has {} columns, expected {n_features}",
                self.weights[row].len()
            )));
        }
        if self.intercepts.len() != n_classes {
            return Err(BackendError::LoadError(format!(
                "intercepts length {} != class count {n_classes}",
                self.intercepts.len()
            )));
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != n_features || scaler.scale.len() != n_features {
                return Err(BackendError::LoadError(
                    "scaler mean/scale length must match feature count".into(),
                ));
            }
            if scaler.scale.iter().any(|s| *s == 0.0) {
                return Err(BackendError::LoadError("scaler scale must be non-zero".into()));
            }
        }
        let all_finite = self
            .weights
            .iter()
            .flatten()
            .chain(&self.intercepts)
            .chain(self.scaler.iter().flat_map(|s| s.mean.iter().chain(&s.scale)))
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(BackendError::LoadError("parameters must be finite".into()));
        }
        Ok(())
    }
}

/// Linear classifier backend
#[derive(Debug, Clone, Default)]
pub struct SoftmaxLinearBackend {
    params: Option<Params>,
}

impl SoftmaxLinearBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an already-loaded backend from in-memory parameters.
    pub fn from_parts(
        weights: Vec<Vec<f32>>,
        intercepts: Vec<f32>,
        scaler: Option<Scaler>,
    ) -> Result<Self, BackendError> {
        let params = Params {
            weights,
            intercepts,
            scaler,
        };
        params.check()?;
        Ok(Self {
            params: Some(params),
        })
    }

    pub fn num_classes(&self) -> usize {
        self.params.as_ref().map_or(0, |p| p.weights.len())
    }
}

impl ModelBackend for SoftmaxLinearBackend {
    fn load_model(
        &mut self,
        model_bytes: &[u8],
        metadata: &ModelMetadata,
    ) -> Result<(), BackendError> {
        let params: Params = serde_json::from_slice(model_bytes)
            .map_err(|e| BackendError::LoadError(format!("{}: {e}", metadata.id)))?;
        params.check()?;
        log::debug!(
            "loaded softmax_linear model {} ({} classes, {} features)",
            metadata.id,
            params.weights.len(),
            params.weights[0].len()
        );
        self.params = Some(params);
        Ok(())
    }

    fn infer(
        &self,
        mut inputs: HashMap<String, Tensor>,
    ) -> Result<HashMap<String, Tensor>, BackendError> {
        let params = self
            .params
            .as_ref()
            .ok_or_else(|| BackendError::InferenceError("Model not loaded".into()))?;
        let mut x = take_input(&mut inputs, params.weights[0].len())?;
        if let Some(scaler) = &params.scaler {
            for ((xi, m), s) in x.iter_mut().zip(&scaler.mean).zip(&scaler.scale) {
                *xi = (*xi - m) / s;
            }
        }

        let logits: Vec<f32> = params
            .weights
            .iter()
            .zip(&params.intercepts)
            .map(|(row, b)| row.iter().zip(&x).map(|(w, xi)| w * xi).sum::<f32>() + b)
            .collect();
        let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exp: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
        let total: f32 = exp.iter().sum();
        let probabilities = exp.into_iter().map(|e| e / total).collect();

        Ok(classification_output(probabilities))
    }

    fn backend_name(&self) -> &str {
        "softmax_linear"
    }

    fn is_loaded(&self) -> bool {
        self.params.is_some()
    }

    fn n_features(&self) -> Option<usize> {
        self.params.as_ref().map(|p| p.weights[0].len())
    }
}
