//! Classifier-backed scoring.

use crate::label::{RiskAssessment, RiskLabel};
use crate::{RiskScorer, ScoreError};
use medi_model::{load_artifact, LoadedModel, ModelBackend, Tensor, CLASS, INPUT};
use medi_vitals::{PatientRecord, FEATURE_NAMES};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Wraps a loaded classifier and maps its ordinal class to a [`RiskLabel`].
#[derive(Clone)]
pub struct ClassifierScorer {
    backend: Arc<dyn ModelBackend>,
    model_id: String,
}

impl ClassifierScorer {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        let model_id = backend.backend_name().to_string();
        Self { backend, model_id }
    }

    pub fn from_loaded(model: LoadedModel) -> Self {
        Self {
            backend: Arc::from(model.backend),
            model_id: model.metadata.id,
        }
    }

    /// Load an artifact whose columns must follow [`FEATURE_NAMES`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScoreError> {
        let model = load_artifact(path, Some(&FEATURE_NAMES[..]))?;
        Ok(Self::from_loaded(model))
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Run the classifier on a raw feature vector and return its class index.
    pub fn predict(&self, features: &[f32]) -> Result<i64, ScoreError> {
        let mut inputs = HashMap::new();
        inputs.insert(INPUT.to_string(), Tensor::vector(INPUT, features.to_vec()));
        let outputs = self.backend.infer(inputs)?;
        let class = outputs
            .get(CLASS)
            .and_then(|t| t.data.first().copied())
            .ok_or(ScoreError::MissingOutput(CLASS))?;
        if !class.is_finite() || class.fract() != 0.0 {
            return Err(ScoreError::InvalidOutput(class));
        }
        Ok(class as i64)
    }
}

impl std::fmt::Debug for ClassifierScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierScorer")
            .field("model_id", &self.model_id)
            .field("backend", &self.backend.backend_name())
            .finish()
    }
}

impl RiskScorer for ClassifierScorer {
    fn name(&self) -> &str {
        "classifier"
    }

    fn assess(&self, record: &PatientRecord) -> Result<RiskAssessment, ScoreError> {
        let class = self.predict(&record.feature_vector())?;
        let label = RiskLabel::from_class_index(class);
        if label == RiskLabel::Unknown {
            log::warn!("model {} produced unmapped class {class}", self.model_id);
        }
        Ok(RiskAssessment {
            label,
            strategy: self.name().to_string(),
            score: None,
            class_index: Some(class),
            factors: Vec::new(),
        })
    }
}
