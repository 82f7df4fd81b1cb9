//! Rosters and the front desk that keeps them in sync with the store.
//!
//! Flow for a registration:
//!
//! ```text
//! form values ──► coerce to record ──► derive identifier ──► store.insert
//!                      │ invalid                                  │
//!                      ▼                                          ▼ ok
//!                   Failed                              refetch collection
//!                                                                 │
//!                                                                 ▼
//!                                                             Succeeded
//! ```
//!
//! Rosters are a read-through cache: every fetch replaces the whole list,
//! and a failed fetch leaves an empty list plus the failure message.

mod table;

pub use table::*;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::form::{FormResult, FormValues, RegistrationForm, SubmissionStatus, SubmitHandler};
use crate::ids;
use crate::models::{doctor_form, patient_form, Doctor, Patient, Record};
use crate::store::{insert_record, select_records, Store, StoreError};

/// In-memory mirror of one collection.
#[derive(Debug, Clone)]
pub struct Roster<R> {
    records: Vec<R>,
    last_error: Option<String>,
}

impl<R> Default for Roster<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            last_error: None,
        }
    }
}

impl<R: Record> Roster<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Message from the most recent failed fetch, cleared by a good one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn replace(&mut self, records: Vec<R>) {
        self.records = records;
        self.last_error = None;
    }

    fn degrade(&mut self, error: &StoreError) {
        self.records.clear();
        self.last_error = Some(error.to_string());
    }

    /// Table of this roster's columns.
    pub fn render(&self) -> String {
        let mut out = render_table(&self.records, R::COLUMNS);
        if let Some(err) = &self.last_error {
            out.push_str(&format!("(could not refresh: {})\n", err));
        }
        out
    }
}

/// Replace `roster` with the current contents of its collection.
async fn refresh<R: Record>(store: &dyn Store, roster: &mut Roster<R>) {
    match select_records::<R>(store).await {
        Ok(records) => {
            debug!(collection = R::COLLECTION, count = records.len(), "roster refreshed");
            roster.replace(records);
        }
        Err(e) => {
            warn!(collection = R::COLLECTION, error = %e, "fetch failed, showing empty roster");
            roster.degrade(&e);
        }
    }
}

/// Submission handler for one record type.
struct Intake<'a, R> {
    store: &'a dyn Store,
    roster: &'a mut Roster<R>,
    year: i32,
}

#[async_trait]
impl<'a, R: Record> SubmitHandler for Intake<'a, R> {
    async fn on_submit(&mut self, values: &FormValues) -> bool {
        let record = match R::from_form(values, self.year) {
            Ok(record) => record,
            Err(e) => {
                warn!(collection = R::COLLECTION, error = %e, "registration rejected");
                return false;
            }
        };

        if let Err(e) = insert_record(self.store, &record).await {
            warn!(collection = R::COLLECTION, error = %e, "insert failed");
            return false;
        }

        info!(collection = R::COLLECTION, id = record.record_id(), "registered");
        refresh(self.store, self.roster).await;
        true
    }
}

/// Which of the two registration flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Patient,
    Doctor,
}

/// The front desk: two forms, two rosters, one store.
pub struct FrontDesk {
    store: Arc<dyn Store>,
    year: fn() -> i32,
    patients: Roster<Patient>,
    doctors: Roster<Doctor>,
    patient_form: RegistrationForm,
    doctor_form: RegistrationForm,
    mounted: bool,
}

impl FrontDesk {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            year: ids::current_year,
            patients: Roster::new(),
            doctors: Roster::new(),
            patient_form: RegistrationForm::new(patient_form()),
            doctor_form: RegistrationForm::new(doctor_form()),
            mounted: false,
        }
    }

    /// Use a fixed year source for identifier derivation.
    pub fn with_year(mut self, year: fn() -> i32) -> Self {
        self.year = year;
        self
    }

    /// Initial load of both rosters. Only the first call fetches.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.fetch_patients().await;
        self.fetch_doctors().await;
    }

    pub async fn fetch_patients(&mut self) {
        refresh(&*self.store, &mut self.patients).await;
    }

    pub async fn fetch_doctors(&mut self) {
        refresh(&*self.store, &mut self.doctors).await;
    }

    pub fn patients(&self) -> &Roster<Patient> {
        &self.patients
    }

    pub fn doctors(&self) -> &Roster<Doctor> {
        &self.doctors
    }

    pub fn form(&self, kind: RecordKind) -> &RegistrationForm {
        match kind {
            RecordKind::Patient => &self.patient_form,
            RecordKind::Doctor => &self.doctor_form,
        }
    }

    pub fn form_mut(&mut self, kind: RecordKind) -> &mut RegistrationForm {
        match kind {
            RecordKind::Patient => &mut self.patient_form,
            RecordKind::Doctor => &mut self.doctor_form,
        }
    }

    /// Submit the patient form.
    pub async fn submit_patient(&mut self) -> FormResult<SubmissionStatus> {
        let mut intake = Intake {
            store: &*self.store,
            roster: &mut self.patients,
            year: (self.year)(),
        };
        self.patient_form.submit(&mut intake).await
    }

    /// Submit the doctor form.
    pub async fn submit_doctor(&mut self) -> FormResult<SubmissionStatus> {
        let mut intake = Intake {
            store: &*self.store,
            roster: &mut self.doctors,
            year: (self.year)(),
        };
        self.doctor_form.submit(&mut intake).await
    }

    pub async fn submit(&mut self, kind: RecordKind) -> FormResult<SubmissionStatus> {
        match kind {
            RecordKind::Patient => self.submit_patient().await,
            RecordKind::Doctor => self.submit_doctor().await,
        }
    }

    pub fn render_patients(&self) -> String {
        self.patients.render()
    }

    pub fn render_doctors(&self) -> String {
        self.doctors.render()
    }
}
