//! The sentinel record.
//!
//! A single well-known document whose only purpose is to prove that the
//! persistence layer can be written and read. It is created the first time a
//! probe finds it missing and it is never updated nor deleted. Its content is
//! not meaningful: being able to read it is the signal.
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::core::databases::error::Error;
use crate::core::databases::{Database, Document, DocumentKey};
use crate::shared::clock;

/// Collection that holds the sentinel record.
pub const SENTINEL_COLLECTION: &str = "_health";

/// Id of the sentinel record inside its collection.
pub const SENTINEL_ID: &str = "status";

#[must_use]
pub fn sentinel_key() -> DocumentKey {
    DocumentKey::new(SENTINEL_COLLECTION.to_owned(), SENTINEL_ID.to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelRecord {
    pub healthy: bool,
    pub created_at: DateTime<Utc>,
}

impl SentinelRecord {
    #[must_use]
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            healthy: true,
            created_at,
        }
    }

    /// The stored form: `{"healthy": true, "createdAt": "<ISO-8601>"}`.
    #[must_use]
    pub fn to_document(&self) -> Document {
        [
            ("healthy".to_owned(), Value::Bool(self.healthy)),
            ("createdAt".to_owned(), Value::String(clock::to_iso8601(&self.created_at))),
        ]
        .into_iter()
        .collect()
    }
}

/// Creates the sentinel record unless it already exists.
///
/// It returns `true` when this call created it.
///
/// # Errors
///
/// Will return `Err` if the database can't be reached.
pub async fn ensure(database: &dyn Database) -> Result<bool, Error> {
    let record = SentinelRecord::new(clock::now());

    database.create_document_if_absent(&sentinel_key(), &record.to_document()).await
}

/// Reads the sentinel record.
///
/// # Errors
///
/// Will return `Err` if the database can't be reached.
pub async fn read(database: &dyn Database) -> Result<Option<Document>, Error> {
    database.get_document(&sentinel_key()).await
}
