//! Fixed-weight rule accumulation.

use crate::label::{RiskAssessment, RiskFactor, RiskLabel};
use crate::{RiskScorer, ScoreError};
use medi_vitals::PatientRecord;

struct Rule {
    name: &'static str,
    points: u32,
    applies: fn(&PatientRecord) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        name: "age over 60",
        points: 2,
        applies: |r| r.age() > 60,
    },
    Rule {
        name: "age 46 to 60",
        points: 1,
        applies: |r| r.age() > 45 && r.age() <= 60,
    },
    Rule {
        name: "elevated blood pressure",
        points: 2,
        applies: |r| r.systolic_bp() > 140 || r.diastolic_bp() > 90,
    },
    Rule {
        name: "abnormal heart rate",
        points: 1,
        applies: |r| r.heart_rate_bpm() > 100 || r.heart_rate_bpm() < 60,
    },
    Rule {
        name: "low oxygen saturation",
        points: 2,
        applies: |r| r.spo2_percent() < 95,
    },
    Rule {
        name: "abnormal BMI",
        points: 1,
        applies: |r| r.bmi() > 30.0 || r.bmi() < 18.5,
    },
    Rule {
        name: "diabetes",
        points: 2,
        applies: |r| r.has_diabetes(),
    },
    Rule {
        name: "smoker",
        points: 2,
        applies: |r| r.smoker(),
    },
    Rule {
        name: "fever",
        points: 1,
        applies: |r| r.temperature_c() > 38.0,
    },
];

/// Deterministic point-based scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn new() -> Self {
        Self
    }

    /// Rules that fire for `record`, in table order.
    pub fn factors(&self, record: &PatientRecord) -> Vec<RiskFactor> {
        RULES
            .iter()
            .filter(|rule| (rule.applies)(record))
            .map(|rule| RiskFactor {
                name: rule.name,
                points: rule.points,
            })
            .collect()
    }

    pub fn score(&self, record: &PatientRecord) -> u32 {
        self.factors(record).iter().map(|f| f.points).sum()
    }
}

impl RiskScorer for HeuristicScorer {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn assess(&self, record: &PatientRecord) -> Result<RiskAssessment, ScoreError> {
        let factors = self.factors(record);
        let score = factors.iter().map(|f| f.points).sum::<u32>();
        let label = RiskLabel::from_score(score);
        log::debug!("heuristic score {score} -> {label}");
        Ok(RiskAssessment {
            label,
            strategy: self.name().to_string(),
            score: Some(score),
            class_index: None,
            factors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> medi_vitals::PatientRecordBuilder {
        PatientRecord::builder()
            .age(30)
            .gender(0)
            .heart_rate_bpm(70)
            .systolic_bp(110)
            .diastolic_bp(70)
            .temperature_c(36.5)
            .spo2_percent(98)
            .bmi(22.0)
            .has_diabetes(false)
            .smoker(false)
    }

    #[test]
    fn age_bands_are_exclusive() {
        let s = HeuristicScorer::new();
        assert_eq!(s.score(&baseline().age(45).build().unwrap()), 0);
        assert_eq!(s.score(&baseline().age(46).build().unwrap()), 1);
        assert_eq!(s.score(&baseline().age(60).build().unwrap()), 1);
        assert_eq!(s.score(&baseline().age(61).build().unwrap()), 2);
    }

    #[test]
    fn threshold_edges_do_not_fire() {
        let s = HeuristicScorer::new();
        let record = baseline()
            .systolic_bp(140)
            .diastolic_bp(90)
            .heart_rate_bpm(100)
            .spo2_percent(95)
            .bmi(30.0)
            .temperature_c(38.0)
            .build()
            .unwrap();
        assert_eq!(s.score(&record), 0);

        let record = baseline().heart_rate_bpm(59).bmi(18.4).build().unwrap();
        assert_eq!(s.score(&record), 2);
    }

    #[test]
    fn either_pressure_reading_counts_once() {
        let s = HeuristicScorer::new();
        let record = baseline().systolic_bp(180).diastolic_bp(120).build().unwrap();
        assert_eq!(s.score(&record), 2);
        let names: Vec<_> = s.factors(&record).iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["elevated blood pressure"]);
    }
}
