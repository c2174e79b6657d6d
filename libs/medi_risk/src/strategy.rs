use crate::{ClassifierScorer, HeuristicScorer, RiskScorer, ScoreError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    #[default]
    Heuristic,
    Classifier,
}

impl std::str::FromStr for ScoringStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" => Ok(ScoringStrategy::Heuristic),
            "classifier" | "model" => Ok(ScoringStrategy::Classifier),
            other => Err(format!("unknown scoring strategy: {other}")),
        }
    }
}

/// `[scoring]` section of the service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScorerConfig {
    #[serde(default)]
    pub strategy: ScoringStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,
}

/// Build the process-wide scorer. Classifier artifacts are read here, once.
pub fn build_scorer(config: &ScorerConfig) -> Result<Arc<dyn RiskScorer>, ScoreError> {
    match config.strategy {
        ScoringStrategy::Heuristic => Ok(Arc::new(HeuristicScorer::new())),
        ScoringStrategy::Classifier => {
            let path = config
                .model_path
                .as_ref()
                .ok_or(ScoreError::ModelPathRequired)?;
            Ok(Arc::new(ClassifierScorer::load(path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_without_path_is_rejected() {
        let config = ScorerConfig {
            strategy: ScoringStrategy::Classifier,
            model_path: None,
        };
        assert!(matches!(
            build_scorer(&config),
            Err(ScoreError::ModelPathRequired)
        ));
    }

    #[test]
    fn default_is_heuristic() {
        let scorer = build_scorer(&ScorerConfig::default()).unwrap();
        assert_eq!(scorer.name(), "heuristic");
    }

    #[test]
    fn strategy_parses() {
        assert_eq!(
            "Classifier".parse::<ScoringStrategy>().unwrap(),
            ScoringStrategy::Classifier
        );
        assert!("forest".parse::<ScoringStrategy>().is_err());
    }
}
