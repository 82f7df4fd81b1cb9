//! Doctor models.

use serde::{Deserialize, Serialize};

use super::{required, Record, RecordError, RecordResult};
use crate::form::{FieldSpec, FormSchema, FormValues};
use crate::ids;

/// A registered doctor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    /// Derived identifier, see [`ids::doctor_id`]
    pub doctor_id: String,
    pub name: String,
    pub contact_number: String,
    /// Medical council registration number
    pub registration_number: String,
    /// Outpatient consultation fee (INR)
    pub opd_fees: f64,
}

/// Form field names for doctor intake.
pub mod doctor_fields {
    pub const NAME: &str = "name";
    pub const CONTACT_NUMBER: &str = "contactNumber";
    pub const REGISTRATION_NUMBER: &str = "registrationNumber";
    pub const OPD_FEES: &str = "opdFees";
}

/// The doctor registration form.
pub fn doctor_form() -> FormSchema {
    use doctor_fields::*;

    FormSchema::new("Register Doctor")
        .field(FieldSpec::text("Full Name", NAME))
        .field(FieldSpec::text("Contact Number", CONTACT_NUMBER))
        .field(FieldSpec::text("Registration Number", REGISTRATION_NUMBER))
        .field(FieldSpec::text("OPD Fees (INR)", OPD_FEES))
}

impl Record for Doctor {
    const COLLECTION: &'static str = "doctors";
    const COLUMNS: &'static [&'static str] = &[
        "doctor_id",
        "name",
        "contact_number",
        "registration_number",
        "opd_fees",
    ];

    fn from_form(values: &FormValues, year: i32) -> RecordResult<Self> {
        use doctor_fields::*;

        let name = required(values, NAME)?;
        let contact_number = required(values, CONTACT_NUMBER)?;
        let registration_number = required(values, REGISTRATION_NUMBER)?;

        let fees_raw = required(values, OPD_FEES)?.trim();
        let opd_fees: f64 = fees_raw
            .parse()
            .map_err(|_| RecordError::invalid(OPD_FEES, format!("{:?} is not a number", fees_raw)))?;
        if !opd_fees.is_finite() || opd_fees < 0.0 {
            return Err(RecordError::invalid(OPD_FEES, "must be a non-negative amount"));
        }

        Ok(Doctor {
            doctor_id: ids::doctor_id_in_year(name, registration_number, year),
            name: name.to_string(),
            contact_number: contact_number.to_string(),
            registration_number: registration_number.to_string(),
            opd_fees,
        })
    }

    fn record_id(&self) -> &str {
        &self.doctor_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake(fees: &str) -> FormValues {
        let mut values = FormValues::new();
        values.insert("name".into(), "John Q Public".into());
        values.insert("contactNumber".into(), "9876543210".into());
        values.insert("registrationNumber".into(), "RN123456".into());
        values.insert("opdFees".into(), fees.into());
        values
    }

    #[test]
    fn test_from_form() {
        let doctor = Doctor::from_form(&intake("500.50"), 2026).unwrap();
        assert_eq!(doctor.doctor_id, "DOC-263456-JQP");
        assert_eq!(doctor.opd_fees, 500.5);
        assert_eq!(doctor.registration_number, "RN123456");
    }

    #[test]
    fn test_rejects_bad_fees() {
        for bad in ["abc", "-10", "NaN", "inf"] {
            let err = Doctor::from_form(&intake(bad), 2026).unwrap_err();
            assert!(
                matches!(err, RecordError::InvalidInput { ref field, .. } if field == "opdFees"),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_blank_field_is_missing() {
        let mut values = intake("300");
        values.insert("registrationNumber".into(), "   ".into());
        assert_eq!(
            Doctor::from_form(&values, 2026).unwrap_err(),
            RecordError::invalid("registrationNumber", "required")
        );
    }

    #[test]
    fn test_form_schema() {
        let form = doctor_form();
        assert_eq!(form.title, "Register Doctor");
        assert_eq!(form.fields.len(), 4);
        assert_eq!(form.fields[3].label, "OPD Fees (INR)");
    }
}
