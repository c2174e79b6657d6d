//! Web front end for vital-sign risk triage.
//!
//! The service renders a single form. A submission is validated into a
//! [`medi_vitals::PatientRecord`] and scored by the configured
//! [`medi_risk::RiskScorer`]; the page is re-rendered with the label or the
//! validation messages and the submitted values.

pub mod assess;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod routes;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use medi_risk::RiskScorer;
use medi_vitals::Validator;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub use config::TriageConfig;
pub use error::{ConfigError, ServerError};

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub validator: Validator,
    pub scorer: Arc<dyn RiskScorer>,
}

impl AppState {
    pub fn new(validator: Validator, scorer: Arc<dyn RiskScorer>) -> Self {
        Self { validator, scorer }
    }

    /// Build state from configuration, loading the classifier if selected.
    pub fn from_config(config: &TriageConfig) -> Result<Self, ServerError> {
        let scorer = medi_risk::build_scorer(&config.scoring)?;
        Ok(Self::new(Validator::new(config.validation.mode), scorer))
    }
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index).post(routes::submit))
        .route("/api/assess", post(routes::api_assess))
        .route("/health", get(routes::health))
        .layer(cors)
        .with_state(state)
}
