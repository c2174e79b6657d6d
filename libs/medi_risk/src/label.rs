use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-level risk classification; `Unknown` only comes from a classifier
/// emitting a class outside 0..=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl RiskLabel {
    pub const HIGH_THRESHOLD: u32 = 7;
    pub const MEDIUM_THRESHOLD: u32 = 4;

    /// Threshold a heuristic point total.
    pub fn from_score(score: u32) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            RiskLabel::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            RiskLabel::Medium
        } else {
            RiskLabel::Low
        }
    }

    /// Map an ordinal classifier output.
    pub fn from_class_index(class: i64) -> Self {
        match class {
            0 => RiskLabel::Low,
            1 => RiskLabel::Medium,
            2 => RiskLabel::High,
            _ => RiskLabel::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLabel::Low => "Low Risk",
            RiskLabel::Medium => "Medium Risk",
            RiskLabel::High => "High Risk",
            RiskLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A heuristic rule that fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskFactor {
    pub name: &'static str,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub label: RiskLabel,
    /// Name of the scorer that produced the label.
    pub strategy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_index: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub factors: Vec<RiskFactor>,
}
