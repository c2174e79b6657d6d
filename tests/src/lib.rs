//! Shared fixtures for the end-to-end tests.

use std::collections::HashMap;
use std::path::PathBuf;

/// Every heuristic factor present; scores 13.
pub const HIGH_RISK: [(&str, &str); 10] = [
    ("age", "65"),
    ("gender", "1"),
    ("heart_rate_bpm", "110"),
    ("systolic_bp", "150"),
    ("diastolic_bp", "95"),
    ("temperature_c", "39"),
    ("spo2_percent", "90"),
    ("bmi", "32"),
    ("has_diabetes", "1"),
    ("smoker", "1"),
];

/// Middle-aged smoker with diabetes, normal vitals; scores 5.
pub const MEDIUM_RISK: [(&str, &str); 10] = [
    ("age", "50"),
    ("gender", "0"),
    ("heart_rate_bpm", "72"),
    ("systolic_bp", "120"),
    ("diastolic_bp", "80"),
    ("temperature_c", "36.8"),
    ("spo2_percent", "97"),
    ("bmi", "24"),
    ("has_diabetes", "1"),
    ("smoker", "1"),
];

/// Healthy adult; scores 0.
pub const LOW_RISK: [(&str, &str); 10] = [
    ("age", "30"),
    ("gender", "0"),
    ("heart_rate_bpm", "70"),
    ("systolic_bp", "110"),
    ("diastolic_bp", "70"),
    ("temperature_c", "36.5"),
    ("spo2_percent", "98"),
    ("bmi", "22"),
    ("has_diabetes", "0"),
    ("smoker", "0"),
];

/// Owned form map, as the web layer would receive it.
pub fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Copy of `pairs` with `key` replaced (or removed when `value` is `None`).
pub fn with(pairs: &[(&str, &str)], key: &str, value: Option<&str>) -> HashMap<String, String> {
    let mut f = form(pairs);
    match value {
        Some(v) => f.insert(key.to_string(), v.to_string()),
        None => f.remove(key),
    };
    f
}

/// The classifier artifact shipped in `models/`.
pub fn bundled_model() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("models")
        .join("risk_classifier.json")
}

/// Write `body` as an artifact in a fresh temp dir.
pub fn write_model(body: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tmpdir");
    let path = dir.path().join("model.json");
    std::fs::write(&path, body).expect("write model");
    (dir, path)
}
