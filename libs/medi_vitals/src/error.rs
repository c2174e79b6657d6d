use crate::field::Field;
use std::fmt;
use thiserror::Error;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    MissingField(Field),
    #[error("{} must be {}", .field.label(), .field.kind().expectation())]
    NonNumericField { field: Field, value: String },
    #[error("{} must be between {min} and {max}", .field.label())]
    OutOfRangeField {
        field: Field,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{} must be 0 or 1", .field.label())]
    InvalidBinaryField { field: Field, value: i64 },
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingField(field) => *field,
            ValidationError::NonNumericField { field, .. }
            | ValidationError::OutOfRangeField { field, .. }
            | ValidationError::InvalidBinaryField { field, .. } => *field,
        }
    }

    pub(crate) fn out_of_range(field: Field, value: f64) -> Self {
        let (min, max) = field.range();
        ValidationError::OutOfRangeField {
            field,
            value,
            min,
            max,
        }
    }
}

/// Non-empty list of field errors, in feature column order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<ValidationError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self(errors)
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Offending fields, without duplicates.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = self.0.iter().map(ValidationError::field).collect();
        fields.dedup();
        fields
    }

    /// User-facing messages, one per error.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
