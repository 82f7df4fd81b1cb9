//! Domain models for the front desk.

mod doctor;
mod patient;

pub use doctor::*;
pub use patient::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::form::FormValues;

/// Errors raised while turning raw form values into a typed record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

pub type RecordResult<T> = Result<T, RecordError>;

impl RecordError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        RecordError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// A record type stored in its own named collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name in the store.
    const COLLECTION: &'static str;
    /// Columns shown in the roster table, in display order.
    const COLUMNS: &'static [&'static str];

    /// Build a record from submitted form values, deriving its identifier
    /// for the given calendar year.
    fn from_form(values: &FormValues, year: i32) -> RecordResult<Self>;

    /// The derived identifier.
    fn record_id(&self) -> &str;
}

/// Look up a field that must be present and non-blank.
pub(crate) fn required<'a>(values: &'a FormValues, field: &str) -> RecordResult<&'a str> {
    match values.get(field) {
        Some(v) if !v.trim().is_empty() => Ok(v.as_str()),
        _ => Err(RecordError::invalid(field, "required")),
    }
}
