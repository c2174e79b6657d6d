use crate::assess::{run_assessment, Outcome, PageContext, FAILURE_MESSAGE};
use crate::render;
use crate::AppState;
use axum::extract::{Form, Json, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use medi_risk::{RiskAssessment, RiskLabel};
use medi_vitals::{Field, FieldKind};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Serialize)]
struct AssessResponse {
    label: RiskLabel,
    assessment: RiskAssessment,
}

#[derive(Debug, Serialize)]
struct FieldErrorDto {
    field: Field,
    message: String,
}

#[derive(Debug, Serialize)]
struct ValidationResponse {
    errors: Vec<FieldErrorDto>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub strategy: String,
}

pub async fn index() -> Html<String> {
    Html(render::page(&PageContext::empty()))
}

pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Html<String> {
    Html(render::page(&PageContext::from_submission(&state, &form)))
}

/// JSON variant of the form: string or numeric values keyed by field name.
pub async fn api_assess(
    State(state): State<AppState>,
    Json(body): Json<BTreeMap<String, JsonValue>>,
) -> Response {
    let form: BTreeMap<String, String> = body
        .into_iter()
        .filter_map(|(k, v)| {
            let raw = json_field_value(&k, v)?;
            Some((k, raw))
        })
        .collect();

    match run_assessment(&state, &form) {
        Outcome::Assessed(assessment) => Json(AssessResponse {
            label: assessment.label,
            assessment,
        })
        .into_response(),
        Outcome::Invalid(errors) => {
            let errors = errors
                .iter()
                .map(|e| FieldErrorDto {
                    field: e.field(),
                    message: e.to_string(),
                })
                .collect();
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationResponse { errors }),
            )
                .into_response()
        }
        Outcome::Failed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: FAILURE_MESSAGE,
            }),
        )
            .into_response(),
    }
}

/// Raw form text for one JSON value. Whole-number fields also accept
/// integral floats such as `65.0`.
fn json_field_value(key: &str, value: JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s),
        JsonValue::Number(n) => {
            let whole_number_field =
                Field::from_key(key).is_some_and(|f| f.kind() != FieldKind::Float);
            match n.as_f64() {
                Some(f) if whole_number_field && n.as_i64().is_none() && f.fract() == 0.0 => {
                    Some(format!("{f:.0}"))
                }
                _ => Some(n.to_string()),
            }
        }
        _ => None,
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        strategy: state.scorer.name().to_string(),
    })
}
