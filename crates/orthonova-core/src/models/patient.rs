//! Patient models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{required, Record, RecordError, RecordResult};
use crate::form::{FieldSpec, FormSchema, FormValues};
use crate::ids;

/// Patient gender as captured at the front desk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == s.trim())
            .ok_or_else(|| RecordError::invalid("gender", format!("unknown value {:?}", s)))
    }
}

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Derived identifier, see [`ids::patient_id`]
    pub patient_id: String,
    /// Full name as entered
    pub name: String,
    /// Age in whole years
    pub age: i32,
    pub gender: Gender,
    pub contact_number: String,
    pub address: String,
}

/// Form field names for patient intake.
pub mod patient_fields {
    pub const NAME: &str = "name";
    pub const AGE: &str = "age";
    pub const GENDER: &str = "gender";
    pub const CONTACT_NUMBER: &str = "contactNumber";
    pub const ADDRESS: &str = "address";
}

/// The patient registration form.
pub fn patient_form() -> FormSchema {
    use patient_fields::*;

    FormSchema::new("Register Patient")
        .field(FieldSpec::text("Full Name", NAME))
        .field(FieldSpec::text("Age", AGE))
        .field(FieldSpec::select(
            "Gender",
            GENDER,
            Gender::ALL.iter().map(|g| g.as_str().to_string()).collect(),
        ))
        .field(FieldSpec::text("Contact Number", CONTACT_NUMBER))
        .field(FieldSpec::textarea("Address", ADDRESS))
}

impl Record for Patient {
    const COLLECTION: &'static str = "patients";
    const COLUMNS: &'static [&'static str] =
        &["patient_id", "name", "age", "gender", "contact_number"];

    fn from_form(values: &FormValues, year: i32) -> RecordResult<Self> {
        use patient_fields::*;

        let name = required(values, NAME)?;
        let contact_number = required(values, CONTACT_NUMBER)?;

        let age_raw = required(values, AGE)?.trim();
        let age: i32 = age_raw
            .parse()
            .map_err(|_| RecordError::invalid(AGE, format!("{:?} is not a whole number", age_raw)))?;
        if age < 0 {
            return Err(RecordError::invalid(AGE, "must not be negative"));
        }

        let gender: Gender = required(values, GENDER)?.parse()?;
        let address = required(values, ADDRESS)?;

        Ok(Patient {
            patient_id: ids::patient_id_in_year(name, contact_number, year),
            name: name.to_string(),
            age,
            gender,
            contact_number: contact_number.to_string(),
            address: address.to_string(),
        })
    }

    fn record_id(&self) -> &str {
        &self.patient_id
    }
}
