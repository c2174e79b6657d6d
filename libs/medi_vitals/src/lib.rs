//! Patient vital-sign records for risk triage.
//!
//! A [`PatientRecord`] can only be obtained from a validated submission, either
//! from raw form strings through [`validate`] or from typed values through
//! [`PatientRecord::builder`]. Both paths share the range table kept on
//! [`Field`].
//!
//! ```
//! use medi_vitals::{validate, ValidationMode};
//!
//! let form = [
//!     ("age", "30"), ("gender", "1"), ("heart_rate_bpm", "70"),
//!     ("systolic_bp", "110"), ("diastolic_bp", "70"), ("temperature_c", "36.5"),
//!     ("spo2_percent", "98"), ("bmi", "22"), ("has_diabetes", "0"), ("smoker", "0"),
//! ];
//! let record = validate(&form, ValidationMode::CollectAll).unwrap();
//! assert_eq!(record.age(), 30);
//! assert!(!record.smoker());
//! ```

pub mod error;
pub mod field;
pub mod record;
pub mod validate;

pub use error::{ValidationError, ValidationErrors};
pub use field::{Field, FieldKind, FEATURE_NAMES};
pub use record::{PatientRecord, PatientRecordBuilder};
pub use validate::{validate, FormSource, ValidationMode, Validator};
