use medi_risk::ScoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid override: {0}")]
    Override(String),
}

/// Startup failures; request-time failures never reach this type.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot initialise scorer: {0}")]
    Scorer(#[from] ScoreError),
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
