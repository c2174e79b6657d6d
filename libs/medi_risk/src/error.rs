use medi_model::BackendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("classifier backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("classifier returned no '{0}' output")]
    MissingOutput(&'static str),
    #[error("classifier returned non-integral class value {0}")]
    InvalidOutput(f32),
    #[error("classifier strategy requires a model path")]
    ModelPathRequired,
}
