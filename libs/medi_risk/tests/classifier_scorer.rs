use medi_risk::{build_scorer, ClassifierScorer, RiskLabel, RiskScorer, ScoreError, ScorerConfig, ScoringStrategy};
use medi_model::BackendError;
use medi_vitals::PatientRecord;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const FEATURES: &str = r#"["age","gender","heart_rate_bpm","systolic_bp","diastolic_bp",
    "temperature_c","spo2_percent","bmi","has_diabetes","smoker"]"#;

fn patient(spo2: u32, smoker: bool) -> PatientRecord {
    PatientRecord::builder()
        .age(40)
        .gender(1)
        .heart_rate_bpm(75)
        .systolic_bp(120)
        .diastolic_bp(80)
        .temperature_c(36.9)
        .spo2_percent(spo2)
        .bmi(23.5)
        .has_diabetes(false)
        .smoker(smoker)
        .build()
        .unwrap()
}

fn write_artifact(dir: &tempfile::TempDir, backend: &str) -> PathBuf {
    let path = dir.path().join("risk_model.json");
    let body = format!(
        r#"{{"metadata":{{"id":"vitals-risk","name":"Vitals risk","version":"1.0.0"}},
            "feature_names":{FEATURES},
            "backend":{backend}}}"#
    );
    std::fs::write(&path, body).expect("write artifact");
    path
}

/// Logistic model where smoking dominates class 2.
fn softmax_artifact(dir: &tempfile::TempDir) -> PathBuf {
    write_artifact(
        dir,
        r#"{"kind":"softmax_linear",
            "weights":[[0,0,0,0,0,0,0,0,0,0],[0,0,0,0,0,0,0,0,0,0],[0,0,0,0,0,0,0,0,0,5]],
            "intercepts":[1.0,0.0,0.0]}"#,
    )
}

/// Single tree emitting class 2 for hypoxia and an unmapped class 5 otherwise.
fn tree_artifact(dir: &tempfile::TempDir) -> PathBuf {
    write_artifact(
        dir,
        r#"{"kind":"tree_ensemble","n_features":10,"n_classes":6,"trees":[{"nodes":[
            {"feature":6,"threshold":94.5,"left":1,"right":2},
            {"class":2},
            {"class":5}]}]}"#,
    )
}

#[test]
fn class_two_maps_to_high_risk() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let scorer = ClassifierScorer::load(softmax_artifact(&dir)).unwrap();
    assert_eq!(scorer.model_id(), "vitals-risk");

    let assessment = scorer.assess(&patient(98, true)).unwrap();
    assert_eq!(assessment.class_index, Some(2));
    assert_eq!(assessment.label, RiskLabel::High);
    assert_eq!(assessment.strategy, "classifier");
    assert_eq!(assessment.score, None);

    let assessment = scorer.assess(&patient(98, false)).unwrap();
    assert_eq!(assessment.label, RiskLabel::Low);
}

#[test]
fn unmapped_class_is_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let scorer = ClassifierScorer::load(tree_artifact(&dir)).unwrap();

    let hypoxic = scorer.assess(&patient(90, false)).unwrap();
    assert_eq!(hypoxic.label, RiskLabel::High);

    let other = scorer.assess(&patient(98, false)).unwrap();
    assert_eq!(other.class_index, Some(5));
    assert_eq!(other.label, RiskLabel::Unknown);
    assert_eq!(other.label.to_string(), "Unknown");
}

#[test]
fn classifier_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let scorer = ClassifierScorer::load(softmax_artifact(&dir)).unwrap();
    let record = patient(92, true);
    assert_eq!(
        scorer.assess(&record).unwrap(),
        scorer.assess(&record).unwrap()
    );
}

#[test]
fn build_scorer_loads_classifier_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScorerConfig {
        strategy: ScoringStrategy::Classifier,
        model_path: Some(tree_artifact(&dir)),
    };
    let scorer = build_scorer(&config).unwrap();
    assert_eq!(scorer.name(), "classifier");

    // artifact is not re-read per call
    std::fs::remove_file(config.model_path.as_ref().unwrap()).unwrap();
    assert_eq!(
        scorer.assess(&patient(90, false)).unwrap().label,
        RiskLabel::High
    );
}

#[test]
fn artifact_with_wrong_columns_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"metadata":{"id":"m","name":"m"},"feature_names":["bmi"],
            "backend":{"kind":"softmax_linear","weights":[[1.0]],"intercepts":[0.0]}}"#,
    )
    .unwrap();
    let err = ClassifierScorer::load(&path).unwrap_err();
    assert!(matches!(err, ScoreError::Backend(_)));
}

#[test]
fn model_width_mismatch_fails_at_load() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("narrow.json");
    std::fs::write(
        &path,
        r#"{"metadata":{"id":"m","name":"m"},
            "backend":{"kind":"softmax_linear","weights":[[1.0],[2.0]],"intercepts":[0.0,0.0]}}"#,
    )
    .unwrap();
    let err = ClassifierScorer::load(&path).unwrap_err();
    assert!(matches!(err, ScoreError::Backend(BackendError::LoadError(_))));
    assert!(err.to_string().contains("model takes 1 inputs"));

    let config = ScorerConfig {
        strategy: ScoringStrategy::Classifier,
        model_path: Some(path),
    };
    assert!(build_scorer(&config).is_err());
}
