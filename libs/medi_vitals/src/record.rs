use crate::error::{ValidationError, ValidationErrors};
use crate::field::{Field, FieldKind};
use serde::Serialize;

/// Normalized, range-checked measurements for one submission.
///
/// Fields are private: a record only exists once every value has passed the
/// presence, conversion and range checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatientRecord {
    age: u32,
    gender: u8,
    heart_rate_bpm: u32,
    systolic_bp: u32,
    diastolic_bp: u32,
    temperature_c: f64,
    spo2_percent: u32,
    bmi: f64,
    has_diabetes: bool,
    smoker: bool,
}

impl PatientRecord {
    pub fn builder() -> PatientRecordBuilder {
        PatientRecordBuilder::default()
    }

    /// Assemble a record from values that already passed every check,
    /// indexed by [`Field::index`].
    pub(crate) fn from_checked(values: &[f64; 10]) -> Self {
        let int = |field: Field| values[field.index()] as u32;
        let flag = |field: Field| values[field.index()] == 1.0;
        Self {
            age: int(Field::Age),
            gender: int(Field::Gender) as u8,
            heart_rate_bpm: int(Field::HeartRateBpm),
            systolic_bp: int(Field::SystolicBp),
            diastolic_bp: int(Field::DiastolicBp),
            temperature_c: values[Field::TemperatureC.index()],
            spo2_percent: int(Field::Spo2Percent),
            bmi: values[Field::Bmi.index()],
            has_diabetes: flag(Field::HasDiabetes),
            smoker: flag(Field::Smoker),
        }
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Encoded as 0 or 1.
    pub fn gender(&self) -> u8 {
        self.gender
    }

    pub fn heart_rate_bpm(&self) -> u32 {
        self.heart_rate_bpm
    }

    pub fn systolic_bp(&self) -> u32 {
        self.systolic_bp
    }

    pub fn diastolic_bp(&self) -> u32 {
        self.diastolic_bp
    }

    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    pub fn spo2_percent(&self) -> u32 {
        self.spo2_percent
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn has_diabetes(&self) -> bool {
        self.has_diabetes
    }

    pub fn smoker(&self) -> bool {
        self.smoker
    }

    /// Numeric value of a single field; flags map to 0.0 / 1.0.
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Age => self.age as f64,
            Field::Gender => self.gender as f64,
            Field::HeartRateBpm => self.heart_rate_bpm as f64,
            Field::SystolicBp => self.systolic_bp as f64,
            Field::DiastolicBp => self.diastolic_bp as f64,
            Field::TemperatureC => self.temperature_c,
            Field::Spo2Percent => self.spo2_percent as f64,
            Field::Bmi => self.bmi,
            Field::HasDiabetes => u8::from(self.has_diabetes) as f64,
            Field::Smoker => u8::from(self.smoker) as f64,
        }
    }

    /// Features in [`crate::FEATURE_NAMES`] order.
    pub fn feature_vector(&self) -> [f32; 10] {
        Field::ALL.map(|field| self.get(field) as f32)
    }
}

/// Typed construction path, subject to the same range checks as form input.
#[derive(Debug, Clone, Default)]
pub struct PatientRecordBuilder {
    values: [Option<f64>; 10],
}

impl PatientRecordBuilder {
    fn set(mut self, field: Field, value: f64) -> Self {
        self.values[field.index()] = Some(value);
        self
    }

    pub fn age(self, age: u32) -> Self {
        self.set(Field::Age, age as f64)
    }

    pub fn gender(self, gender: u8) -> Self {
        self.set(Field::Gender, gender as f64)
    }

    pub fn heart_rate_bpm(self, bpm: u32) -> Self {
        self.set(Field::HeartRateBpm, bpm as f64)
    }

    pub fn systolic_bp(self, mmhg: u32) -> Self {
        self.set(Field::SystolicBp, mmhg as f64)
    }

    pub fn diastolic_bp(self, mmhg: u32) -> Self {
        self.set(Field::DiastolicBp, mmhg as f64)
    }

    pub fn temperature_c(self, celsius: f64) -> Self {
        self.set(Field::TemperatureC, celsius)
    }

    pub fn spo2_percent(self, percent: u32) -> Self {
        self.set(Field::Spo2Percent, percent as f64)
    }

    pub fn bmi(self, bmi: f64) -> Self {
        self.set(Field::Bmi, bmi)
    }

    pub fn has_diabetes(self, yes: bool) -> Self {
        self.set(Field::HasDiabetes, u8::from(yes) as f64)
    }

    pub fn smoker(self, yes: bool) -> Self {
        self.set(Field::Smoker, u8::from(yes) as f64)
    }

    /// Check every field and return all violations at once.
    pub fn build(self) -> Result<PatientRecord, ValidationErrors> {
        let mut checked = [0.0; 10];
        let mut errors = Vec::new();
        for field in Field::ALL {
            match self.values[field.index()] {
                None => errors.push(ValidationError::MissingField(field)),
                Some(value) => match check_value(field, value) {
                    Ok(v) => checked[field.index()] = v,
                    Err(e) => errors.push(e),
                },
            }
        }
        if errors.is_empty() {
            Ok(PatientRecord::from_checked(&checked))
        } else {
            Err(ValidationErrors::new(errors))
        }
    }
}

/// Binary and range constraints on an already-converted value.
pub(crate) fn check_value(field: Field, value: f64) -> Result<f64, ValidationError> {
    match field.kind() {
        FieldKind::Binary if value != 0.0 && value != 1.0 => {
            Err(ValidationError::InvalidBinaryField {
                field,
                value: value as i64,
            })
        }
        _ if !value.is_finite() => Err(ValidationError::NonNumericField {
            field,
            value: value.to_string(),
        }),
        _ if !field.contains(value) => Err(ValidationError::out_of_range(field, value)),
        _ => Ok(value),
    }
}
