//! Request boundary: validation, scoring, and user-facing messages.

use crate::AppState;
use medi_risk::{RiskAssessment, RiskLabel, ScoreError};
use medi_vitals::{Field, FormSource, ValidationErrors};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const SUCCESS_MESSAGE: &str = "Risk assessment completed successfully!";
pub const FAILURE_MESSAGE: &str = "An error occurred while assessing risk. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

/// Flash-style message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Assessed(RiskAssessment),
    Invalid(ValidationErrors),
    /// Scoring failed after validation passed.
    Failed(ScoreError),
}

/// Validate and score one submission. Never panics on bad input; every
/// failure is returned as an [`Outcome`].
pub fn run_assessment<F: FormSource + ?Sized>(state: &AppState, form: &F) -> Outcome {
    let record = match state.validator.validate(form) {
        Ok(record) => record,
        Err(errors) => {
            log::warn!("rejected submission: {errors}");
            return Outcome::Invalid(errors);
        }
    };
    match state.scorer.assess(&record) {
        Ok(assessment) => {
            log::info!(
                "assessed submission with {}: {}",
                assessment.strategy,
                assessment.label
            );
            Outcome::Assessed(assessment)
        }
        Err(err) => {
            log::error!("scoring with {} failed: {err}", state.scorer.name());
            Outcome::Failed(err)
        }
    }
}

/// Everything the page template needs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageContext {
    pub show_predictor: bool,
    pub prediction: Option<RiskLabel>,
    pub assessment: Option<RiskAssessment>,
    pub messages: Vec<Message>,
    /// Submitted values keyed by form field, echoed back into the inputs.
    pub values: BTreeMap<String, String>,
}

impl PageContext {
    /// Blank form, before any submission.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_submission(state: &AppState, form: &HashMap<String, String>) -> Self {
        let values = form
            .iter()
            .filter(|(k, _)| Field::from_key(k).is_some())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let mut page = Self {
            show_predictor: true,
            values,
            ..Self::default()
        };
        match run_assessment(state, form) {
            Outcome::Assessed(assessment) => {
                page.prediction = Some(assessment.label);
                page.assessment = Some(assessment);
                page.messages.push(Message::success(SUCCESS_MESSAGE));
            }
            Outcome::Invalid(errors) => {
                page.messages
                    .extend(errors.messages().into_iter().map(Message::error));
            }
            Outcome::Failed(_) => page.messages.push(Message::error(FAILURE_MESSAGE)),
        }
        page
    }
}
