//! The persistence module.
//!
//! The health service only needs a tiny subset of a document store: create a
//! document when it does not exist yet, and read it back. That is modelled
//! with one [`Database`] trait.
//!
//! There are three implementations of the trait (three drivers):
//!
//! - [`Sqlite`](crate::core::databases::sqlite::Sqlite)
//! - [`Mysql`](crate::core::databases::mysql::Mysql)
//! - [`Firestore`](crate::core::databases::firestore::Firestore)
//!
//! The SQL drivers keep every document in one table:
//!
//!  Field        | Sample data                                         | Description
//! ---|---|---
//!  `collection` | `_health`                                           | Logical collection
//!  `id`         | `status`                                            | Document id inside the collection
//!  `data`       | `{"healthy":true,"createdAt":"2024-05-01T10:15:30.123Z"}` | JSON encoded document
//!
//! > **NOTICE**: There are no database migrations. The table is created on
//! first use with `CREATE TABLE IF NOT EXISTS`.
pub mod driver;
pub mod error;
pub mod firestore;
pub mod mysql;
pub mod sqlite;

use async_trait::async_trait;
use derive_more::{Constructor, Display};
use escrow_health_configuration::DatabaseDriver as Driver;
#[cfg(test)]
use mockall::automock;

use self::error::Error;

/// A schemaless document: a JSON object.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// The logical key of a document: collection plus document id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Constructor, Display)]
#[display("{collection}/{id}")]
pub struct DocumentKey {
    pub collection: String,
    pub id: String,
}

/// The persistence trait. It contains all the methods the health service uses
/// to interact with the database.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Sync + Send {
    /// The driver behind this implementation.
    fn driver(&self) -> Driver;

    /// It stores the document unless a document with the same key already
    /// exists. An existing document is never overwritten.
    ///
    /// It returns `true` when the document was created by this call.
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to reach the database or to save.
    async fn create_document_if_absent(&self, key: &DocumentKey, document: &Document) -> Result<bool, Error>;

    /// It reads a document.
    ///
    /// It returns `Some(Document)` if a document with the key exists, `None`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to reach the database or to load.
    async fn get_document(&self, key: &DocumentKey) -> Result<Option<Document>, Error>;
}

/// Decodes a document stored as JSON text by the SQL drivers.
fn decode_document(key: &DocumentKey, data: &str, driver: Driver) -> Result<Document, Error> {
    serde_json::from_str::<Document>(data).map_err(|err| Error::InvalidDocument {
        key: key.to_string(),
        message: err.to_string(),
        driver,
    })
}
