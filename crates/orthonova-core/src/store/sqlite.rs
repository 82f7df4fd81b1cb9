//! Local store backed by SQLite.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use super::{Store, StoreError, StoreResult};
use crate::db::Database;
use crate::models::{Doctor, Patient, Record};

/// [`Store`] over the typed `patients` / `doctors` tables.
///
/// Rows are decoded into their record type on insert, so a row that does not
/// fit its collection is rejected before touching the database.
pub struct SqliteStore {
    db: Mutex<Database>,
}

impl SqliteStore {
    /// Open a store file, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Ok(Self::from_database(Database::open(path)?))
    }

    /// Create an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::from_database(Database::open_in_memory()?))
    }

    pub fn from_database(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Database>> {
        Ok(self.db.lock()?)
    }
}

fn to_rows<R: Record>(records: Vec<R>) -> StoreResult<Vec<Value>> {
    records
        .iter()
        .map(|r| serde_json::to_value(r).map_err(StoreError::from))
        .collect()
}

#[async_trait]
impl Store for SqliteStore {
    async fn select(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let db = self.lock()?;
        if collection == Patient::COLLECTION {
            to_rows(db.list_patients()?)
        } else if collection == Doctor::COLLECTION {
            to_rows(db.list_doctors()?)
        } else {
            Err(StoreError::UnknownCollection(collection.to_string()))
        }
    }

    async fn insert(&self, collection: &str, row: Value) -> StoreResult<()> {
        let db = self.lock()?;
        if collection == Patient::COLLECTION {
            let patient: Patient = serde_json::from_value(row)?;
            db.insert_patient(&patient)?;
        } else if collection == Doctor::COLLECTION {
            let doctor: Doctor = serde_json::from_value(row)?;
            db.insert_doctor(&doctor)?;
        } else {
            return Err(StoreError::UnknownCollection(collection.to_string()));
        }
        Ok(())
    }
}
