//! Form validation: raw strings in, [`PatientRecord`] out.

use crate::error::{ValidationError, ValidationErrors};
use crate::field::{Field, FieldKind};
use crate::record::{check_value, PatientRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Anything that can look up a raw submitted value by form key.
pub trait FormSource {
    fn get_field(&self, key: &str) -> Option<&str>;
}

impl FormSource for HashMap<String, String> {
    fn get_field(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl FormSource for BTreeMap<String, String> {
    fn get_field(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl FormSource for [(&str, &str)] {
    fn get_field(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

impl<const N: usize> FormSource for [(&str, &str); N] {
    fn get_field(&self, key: &str) -> Option<&str> {
        self.as_slice().get_field(key)
    }
}

/// How many violations a failed validation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Stop at the first offending field.
    FailFast,
    /// Check every field and report each violation.
    #[default]
    CollectAll,
}

impl std::str::FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fail_fast" => Ok(ValidationMode::FailFast),
            "collect_all" => Ok(ValidationMode::CollectAll),
            other => Err(format!("unknown validation mode: {other}")),
        }
    }
}

/// Validator with a fixed mode, convenient to share in application state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    mode: ValidationMode,
}

impl Validator {
    pub fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn validate<F: FormSource + ?Sized>(
        &self,
        form: &F,
    ) -> Result<PatientRecord, ValidationErrors> {
        validate(form, self.mode)
    }
}

/// Validate all ten required fields of a raw submission.
///
/// Fields are visited in feature column order; in [`ValidationMode::FailFast`]
/// only the first violation is returned.
pub fn validate<F: FormSource + ?Sized>(
    form: &F,
    mode: ValidationMode,
) -> Result<PatientRecord, ValidationErrors> {
    let mut checked = [0.0; 10];
    let mut errors = Vec::new();

    for field in Field::ALL {
        match check_field(field, form.get_field(field.key())) {
            Ok(value) => checked[field.index()] = value,
            Err(err) => {
                log::debug!("rejected {field}: {err}");
                errors.push(err);
                if mode == ValidationMode::FailFast {
                    break;
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(PatientRecord::from_checked(&checked))
    } else {
        Err(ValidationErrors::new(errors))
    }
}

fn check_field(field: Field, raw: Option<&str>) -> Result<f64, ValidationError> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(ValidationError::MissingField(field)),
    };
    let non_numeric = || ValidationError::NonNumericField {
        field,
        value: raw.to_string(),
    };
    let value = match field.kind() {
        FieldKind::Integer | FieldKind::Binary => match raw.parse::<i64>() {
            Ok(v) => v as f64,
            // too wide for i64 but still a whole number; the range check rejects it
            Err(_) if is_integer_literal(raw) => raw.parse::<f64>().map_err(|_| non_numeric())?,
            Err(_) => return Err(non_numeric()),
        },
        FieldKind::Float => {
            let v = raw.parse::<f64>().map_err(|_| non_numeric())?;
            if !v.is_finite() {
                return Err(non_numeric());
            }
            v
        }
    };
    check_value(field, value)
}

fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
