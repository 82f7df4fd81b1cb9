//! Table store interface.
//!
//! A store holds named collections of JSON rows and offers exactly two
//! operations: read a whole collection, and append one row. Failures are
//! returned, never swallowed; deciding how to degrade is the caller's job.

mod rest;
mod sqlite;

pub use rest::*;
pub use sqlite::*;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::db::DbError;
use crate::models::Record;

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Malformed row: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid access key")]
    InvalidKey,

    #[error("Store lock poisoned")]
    Poisoned,
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A remote or local table store.
#[async_trait]
pub trait Store: Send + Sync {
    /// All rows of `collection`, in whatever order the store returns them.
    async fn select(&self, collection: &str) -> StoreResult<Vec<Value>>;

    /// Append `row` to `collection`.
    async fn insert(&self, collection: &str, row: Value) -> StoreResult<()>;
}

/// Read and decode every record of type `R`.
pub async fn select_records<R: Record>(store: &dyn Store) -> StoreResult<Vec<R>> {
    store
        .select(R::COLLECTION)
        .await?
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(StoreError::from))
        .collect()
}

/// Encode and append one record of type `R`.
pub async fn insert_record<R: Record>(store: &dyn Store, record: &R) -> StoreResult<()> {
    let row = serde_json::to_value(record)?;
    store.insert(R::COLLECTION, row).await
}
