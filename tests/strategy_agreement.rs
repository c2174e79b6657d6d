//! The bundled classifier and the point table should agree on clear-cut
//! patients, and both must be reachable through the same configuration.

use medi_risk::{
    build_scorer, ClassifierScorer, HeuristicScorer, RiskLabel, RiskScorer, ScoreError,
    ScorerConfig, ScoringStrategy,
};
use medi_vitals::{PatientRecord, Validator};
use pretty_assertions::assert_eq;
use tests::{bundled_model, form, write_model, HIGH_RISK, LOW_RISK, MEDIUM_RISK};

fn record(pairs: &[(&str, &str)]) -> PatientRecord {
    Validator::default().validate(&form(pairs)).unwrap()
}

fn classifier_config() -> ScorerConfig {
    ScorerConfig {
        strategy: ScoringStrategy::Classifier,
        model_path: Some(bundled_model()),
    }
}

#[test]
fn bundled_model_matches_heuristic_on_reference_patients() {
    let _ = env_logger::builder().is_test(true).try_init();
    let heuristic = HeuristicScorer::new();
    let classifier = ClassifierScorer::load(bundled_model()).unwrap();
    assert_eq!(classifier.model_id(), "vitals-risk-logit");

    for (pairs, expected) in [
        (&HIGH_RISK, RiskLabel::High),
        (&MEDIUM_RISK, RiskLabel::Medium),
        (&LOW_RISK, RiskLabel::Low),
    ] {
        let r = record(pairs);
        assert_eq!(heuristic.assess(&r).unwrap().label, expected);
        assert_eq!(classifier.assess(&r).unwrap().label, expected);
    }
}

#[test]
fn classifier_reports_class_index_not_score() {
    let scorer = build_scorer(&classifier_config()).unwrap();
    assert_eq!(scorer.name(), "classifier");

    let assessment = scorer.assess(&record(&HIGH_RISK)).unwrap();
    assert_eq!(assessment.class_index, Some(2));
    assert_eq!(assessment.score, None);
    assert!(assessment.factors.is_empty());
}

#[test]
fn shared_scorer_is_stable_across_calls() {
    let scorer = build_scorer(&classifier_config()).unwrap();
    let r = record(&MEDIUM_RISK);
    let first = scorer.assess(&r).unwrap();
    for _ in 0..10 {
        assert_eq!(scorer.assess(&r).unwrap(), first);
    }
}

#[test]
fn artifact_for_other_columns_is_refused() {
    let body = std::fs::read_to_string(bundled_model())
        .unwrap()
        .replace("\"bmi\"", "\"body_mass\"");
    let (_dir, path) = write_model(&body);
    let config = ScorerConfig {
        strategy: ScoringStrategy::Classifier,
        model_path: Some(path),
    };
    assert!(matches!(build_scorer(&config), Err(ScoreError::Backend(_))));
}
