//! Risk triage over validated vital signs.
//!
//! Two interchangeable [`RiskScorer`] strategies are provided:
//! [`HeuristicScorer`] accumulates fixed points per risk factor, and
//! [`ClassifierScorer`] defers to a pre-trained model loaded through
//! `medi_model`. [`build_scorer`] picks one from a [`ScorerConfig`].

pub mod classifier;
pub mod error;
pub mod heuristic;
pub mod label;
pub mod strategy;

pub use classifier::ClassifierScorer;
pub use error::ScoreError;
pub use heuristic::HeuristicScorer;
pub use label::{RiskAssessment, RiskFactor, RiskLabel};
pub use strategy::{build_scorer, ScorerConfig, ScoringStrategy};

use medi_vitals::PatientRecord;

/// A strategy that maps a validated record to a risk label.
///
/// Implementations hold no per-request state, so one instance is shared by
/// every request handler.
pub trait RiskScorer: Send + Sync {
    fn name(&self) -> &str;

    fn assess(&self, record: &PatientRecord) -> Result<RiskAssessment, ScoreError>;
}
