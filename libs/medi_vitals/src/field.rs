//! The ten submitted fields and their validation constraints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column order expected by classifier artifacts.
pub const FEATURE_NAMES: [&str; 10] = [
    "age",
    "gender",
    "heart_rate_bpm",
    "systolic_bp",
    "diastolic_bp",
    "temperature_c",
    "spo2_percent",
    "bmi",
    "has_diabetes",
    "smoker",
];

/// How a raw value is parsed and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
    /// Integer that must be exactly 0 or 1.
    Binary,
}

impl FieldKind {
    /// Phrase used in "must be ..." messages when conversion fails.
    pub fn expectation(self) -> &'static str {
        match self {
            FieldKind::Integer | FieldKind::Binary => "a whole number",
            FieldKind::Float => "a number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Age,
    Gender,
    HeartRateBpm,
    SystolicBp,
    DiastolicBp,
    TemperatureC,
    Spo2Percent,
    Bmi,
    HasDiabetes,
    Smoker,
}

impl Field {
    /// All fields in feature column order.
    pub const ALL: [Field; 10] = [
        Field::Age,
        Field::Gender,
        Field::HeartRateBpm,
        Field::SystolicBp,
        Field::DiastolicBp,
        Field::TemperatureC,
        Field::Spo2Percent,
        Field::Bmi,
        Field::HasDiabetes,
        Field::Smoker,
    ];

    /// Position of the field in the feature vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Form key, e.g. `heart_rate_bpm`.
    pub fn key(self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// Human label used in messages and form captions.
    pub fn label(self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::HeartRateBpm => "Heart rate",
            Field::SystolicBp => "Systolic BP",
            Field::DiastolicBp => "Diastolic BP",
            Field::TemperatureC => "Temperature",
            Field::Spo2Percent => "SpO2",
            Field::Bmi => "BMI",
            Field::HasDiabetes => "Diabetes",
            Field::Smoker => "Smoker",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Gender | Field::HasDiabetes | Field::Smoker => FieldKind::Binary,
            Field::TemperatureC | Field::Bmi => FieldKind::Float,
            _ => FieldKind::Integer,
        }
    }

    /// Inclusive valid range. Binary fields report `(0, 1)`.
    pub fn range(self) -> (f64, f64) {
        match self {
            Field::Age => (0.0, 120.0),
            Field::HeartRateBpm => (40.0, 200.0),
            Field::SystolicBp => (70.0, 250.0),
            Field::DiastolicBp => (40.0, 150.0),
            Field::TemperatureC => (35.0, 42.0),
            Field::Spo2Percent => (70.0, 100.0),
            Field::Bmi => (10.0, 60.0),
            Field::Gender | Field::HasDiabetes | Field::Smoker => (0.0, 1.0),
        }
    }

    pub fn contains(self, value: f64) -> bool {
        let (min, max) = self.range();
        (min..=max).contains(&value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
