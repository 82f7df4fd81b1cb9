//! Orthonova Core Library
//!
//! Front-desk registration for a small clinic: patient and doctor intake,
//! derived identifiers, and rosters mirrored from a table store.
//!
//! # Architecture
//!
//! ```text
//!   RegistrationForm (patient)        RegistrationForm (doctor)
//!            │ submit                           │ submit
//!            ▼                                  ▼
//!   ┌──────────────────────── FrontDesk ─────────────────────────┐
//!   │  coerce values → derive identifier → insert → refetch      │
//!   └───────────────┬──────────────────────────────┬─────────────┘
//!                   │ select / insert              │
//!                   ▼                              ▼
//!        RestStore (remote, /rest/v1)     SqliteStore (local file)
//! ```
//!
//! # Modules
//!
//! - [`ids`]: patient and doctor identifier derivation
//! - [`models`]: Patient / Doctor records and form coercion
//! - [`form`]: schema-driven registration form engine
//! - [`store`]: table store interface and its backends
//! - [`db`]: SQLite layer behind the local store
//! - [`roster`]: rosters, table rendering and the front desk orchestrator
//! - [`config`]: environment / file configuration

pub mod config;
pub mod db;
pub mod form;
pub mod ids;
pub mod models;
pub mod roster;
pub mod store;

// Re-export commonly used types
pub use crate::config::{DeskConfig, StoreBackend};
pub use form::{FieldKind, FieldSpec, FormSchema, FormValues, RegistrationForm, SubmissionStatus};
pub use models::{Doctor, Gender, Patient, Record};
pub use roster::{FrontDesk, RecordKind, Roster};
pub use store::{RestStore, SqliteStore, Store};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DeskError {
    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

impl From<store::StoreError> for DeskError {
    fn from(e: store::StoreError) -> Self {
        DeskError::StoreError(e.to_string())
    }
}

impl From<crate::config::ConfigError> for DeskError {
    fn from(e: crate::config::ConfigError) -> Self {
        DeskError::ConfigError(e.to_string())
    }
}

impl From<form::FormError> for DeskError {
    fn from(e: form::FormError) -> Self {
        DeskError::InvalidInput(e.to_string())
    }
}

impl From<std::io::Error> for DeskError {
    fn from(e: std::io::Error) -> Self {
        DeskError::RuntimeError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for DeskError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DeskError::RuntimeError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a desk using `ORTHONOVA_*` configuration.
#[uniffi::export]
pub fn open_desk_from_env() -> Result<Arc<DeskCore>, DeskError> {
    let backend = DeskConfig::load()?.backend()?;
    DeskCore::with_store(backend.connect()?)
}

/// Open a desk over a local database file.
#[uniffi::export]
pub fn open_desk(path: String) -> Result<Arc<DeskCore>, DeskError> {
    DeskCore::with_store(Arc::new(SqliteStore::open(&path)?))
}

/// Open a desk over a remote store.
#[uniffi::export]
pub fn open_remote_desk(url: String, anon_key: String) -> Result<Arc<DeskCore>, DeskError> {
    let backend = StoreBackend::Rest {
        url,
        anon_key,
        timeout: DeskConfig::default().request_timeout(),
    };
    DeskCore::with_store(backend.connect()?)
}

/// Create an in-memory desk (for testing).
#[uniffi::export]
pub fn open_desk_in_memory() -> Result<Arc<DeskCore>, DeskError> {
    DeskCore::with_store(Arc::new(SqliteStore::open_in_memory()?))
}

/// Preview the identifier a patient registration would get this year.
#[uniffi::export]
pub fn derive_patient_id(name: String, contact: String) -> String {
    ids::patient_id(&name, &contact)
}

/// Preview the identifier a doctor registration would get this year.
#[uniffi::export]
pub fn derive_doctor_id(name: String, registration_number: String) -> String {
    ids::doctor_id(&name, &registration_number)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe front desk wrapper for FFI.
///
/// Store calls run to completion on a private single-threaded runtime, so
/// methods must be called from plain threads. Called from inside an async
/// runtime they fail with [`DeskError::RuntimeError`].
#[derive(uniffi::Object)]
pub struct DeskCore {
    runtime: tokio::runtime::Runtime,
    desk: Mutex<FrontDesk>,
}

impl DeskCore {
    fn with_store(store: Arc<dyn Store>) -> Result<Arc<Self>, DeskError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Arc::new(Self {
            runtime,
            desk: Mutex::new(FrontDesk::new(store)),
        }))
    }

    fn block_on<F: std::future::Future>(&self, future: F) -> Result<F::Output, DeskError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(DeskError::RuntimeError(
                "DeskCore cannot be called from inside an async runtime".into(),
            ));
        }
        Ok(self.runtime.block_on(future))
    }
}

#[uniffi::export]
impl DeskCore {
    // =========================================================================
    // Roster Operations
    // =========================================================================

    /// Initial load of both rosters.
    pub fn mount(&self) -> Result<(), DeskError> {
        let mut desk = self.desk.lock()?;
        self.block_on(desk.mount())
    }

    /// Reload one roster from the store.
    pub fn refresh(&self, kind: FfiRecordKind) -> Result<(), DeskError> {
        let mut desk = self.desk.lock()?;
        match kind {
            FfiRecordKind::Patient => self.block_on(desk.fetch_patients()),
            FfiRecordKind::Doctor => self.block_on(desk.fetch_doctors()),
        }
    }

    pub fn patients(&self) -> Result<Vec<FfiPatient>, DeskError> {
        let desk = self.desk.lock()?;
        Ok(desk.patients().records().iter().cloned().map(Into::into).collect())
    }

    pub fn doctors(&self) -> Result<Vec<FfiDoctor>, DeskError> {
        let desk = self.desk.lock()?;
        Ok(desk.doctors().records().iter().cloned().map(Into::into).collect())
    }

    /// Roster as a text table.
    pub fn render_roster(&self, kind: FfiRecordKind) -> Result<String, DeskError> {
        let desk = self.desk.lock()?;
        Ok(match kind {
            FfiRecordKind::Patient => desk.render_patients(),
            FfiRecordKind::Doctor => desk.render_doctors(),
        })
    }

    // =========================================================================
    // Form Operations
    // =========================================================================

    /// Field descriptors of a registration form.
    pub fn form_fields(&self, kind: FfiRecordKind) -> Result<Vec<FfiField>, DeskError> {
        let desk = self.desk.lock()?;
        let form = desk.form(kind.into());
        Ok(form.schema().fields.iter().cloned().map(Into::into).collect())
    }

    pub fn set_field(
        &self,
        kind: FfiRecordKind,
        name: String,
        value: String,
    ) -> Result<(), DeskError> {
        let mut desk = self.desk.lock()?;
        desk.form_mut(kind.into()).set_value(&name, value)?;
        Ok(())
    }

    pub fn field_value(&self, kind: FfiRecordKind, name: String) -> Result<String, DeskError> {
        let desk = self.desk.lock()?;
        Ok(desk.form(kind.into()).value(&name).to_string())
    }

    /// Submit a form. Fails with `InvalidInput` if any field is empty.
    pub fn submit(&self, kind: FfiRecordKind) -> Result<FfiSubmissionStatus, DeskError> {
        let mut desk = self.desk.lock()?;
        let status = self.block_on(desk.submit(kind.into()))??;
        Ok(status.into())
    }

    pub fn status(&self, kind: FfiRecordKind) -> Result<FfiSubmissionStatus, DeskError> {
        let desk = self.desk.lock()?;
        Ok(desk.form(kind.into()).status().into())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiRecordKind {
    Patient,
    Doctor,
}

impl From<FfiRecordKind> for RecordKind {
    fn from(kind: FfiRecordKind) -> Self {
        match kind {
            FfiRecordKind::Patient => RecordKind::Patient,
            FfiRecordKind::Doctor => RecordKind::Doctor,
        }
    }
}

/// FFI-safe submission status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiSubmissionStatus {
    Idle,
    Succeeded,
    Failed,
}

impl From<SubmissionStatus> for FfiSubmissionStatus {
    fn from(status: SubmissionStatus) -> Self {
        match status {
            SubmissionStatus::Idle => FfiSubmissionStatus::Idle,
            SubmissionStatus::Succeeded => FfiSubmissionStatus::Succeeded,
            SubmissionStatus::Failed => FfiSubmissionStatus::Failed,
        }
    }
}

/// FFI-safe form field.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiField {
    pub label: String,
    pub name: String,
    /// "text", "textarea" or "select"
    pub kind: String,
    pub options: Vec<String>,
}

impl From<FieldSpec> for FfiField {
    fn from(field: FieldSpec) -> Self {
        let (kind, options) = match field.kind {
            FieldKind::Text => ("text", Vec::new()),
            FieldKind::Textarea => ("textarea", Vec::new()),
            FieldKind::Select { options } => ("select", options),
        };
        Self {
            label: field.label,
            name: field.name,
            kind: kind.to_string(),
            options,
        }
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub patient_id: String,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub contact_number: String,
    pub address: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            patient_id: patient.patient_id,
            name: patient.name,
            age: patient.age,
            gender: patient.gender.to_string(),
            contact_number: patient.contact_number,
            address: patient.address,
        }
    }
}

/// FFI-safe doctor.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctor {
    pub doctor_id: String,
    pub name: String,
    pub contact_number: String,
    pub registration_number: String,
    pub opd_fees: f64,
}

impl From<Doctor> for FfiDoctor {
    fn from(doctor: Doctor) -> Self {
        Self {
            doctor_id: doctor.doctor_id,
            name: doctor.name,
            contact_number: doctor.contact_number,
            registration_number: doctor.registration_number,
            opd_fees: doctor.opd_fees,
        }
    }
}
