//! The `MySQL` database driver.
use std::time::Duration;

use async_trait::async_trait;
use escrow_health_configuration::DatabaseDriver as Driver;
use r2d2::{Pool, PooledConnection};
use r2d2_mysql::mysql::prelude::Queryable;
use r2d2_mysql::mysql::{params, Opts, OptsBuilder};
use r2d2_mysql::MySqlConnectionManager;

use super::{decode_document, Database, Document, DocumentKey, Error};

const DRIVER: Driver = Driver::MySQL;

/// Maximum time to wait for a pooled connection.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(3);

const CREATE_DOCUMENTS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS documents (
        collection VARCHAR(191) NOT NULL,
        id VARCHAR(191) NOT NULL,
        data TEXT NOT NULL,
        PRIMARY KEY (collection, id)
    );";

pub struct Mysql {
    pool: Pool<MySqlConnectionManager>,
}

impl Mysql {
    /// It instantiates a new `MySQL` database driver.
    ///
    /// No connection is opened until the first query.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `db_path` is not a valid `MySQL` connection URL.
    pub fn new(db_path: &str) -> Result<Self, Error> {
        let opts = Opts::from_url(db_path)?;
        let builder = OptsBuilder::from_opts(opts);
        let manager = MySqlConnectionManager::new(builder);
        let pool = Pool::builder()
            .min_idle(Some(0))
            .connection_timeout(CONNECTION_TIMEOUT)
            .build_unchecked(manager);

        Ok(Self { pool })
    }

    fn connection(pool: &Pool<MySqlConnectionManager>) -> Result<PooledConnection<MySqlConnectionManager>, Error> {
        let mut conn = pool.get().map_err(|e| (e, DRIVER))?;

        conn.query_drop(CREATE_DOCUMENTS_TABLE)?;

        Ok(conn)
    }
}

#[async_trait]
impl Database for Mysql {
    fn driver(&self) -> Driver {
        DRIVER
    }

    /// Refer to [`databases::Database::create_document_if_absent`](crate::core::databases::Database::create_document_if_absent).
    async fn create_document_if_absent(&self, key: &DocumentKey, document: &Document) -> Result<bool, Error> {
        const COMMAND: &str = "INSERT IGNORE INTO documents (collection, id, data) VALUES (:collection, :id, :data)";

        let pool = self.pool.clone();
        let key = key.clone();
        let data = serde_json::Value::Object(document.clone()).to_string();

        tokio::task::spawn_blocking(move || -> Result<bool, Error> {
            let mut conn = Self::connection(&pool)?;

            conn.exec_drop(
                COMMAND,
                params! { "collection" => key.collection.as_str(), "id" => key.id.as_str(), "data" => data.as_str() },
            )?;

            Ok(conn.affected_rows() == 1)
        })
        .await
        .map_err(|e| (e, DRIVER))?
    }

    /// Refer to [`databases::Database::get_document`](crate::core::databases::Database::get_document).
    async fn get_document(&self, key: &DocumentKey) -> Result<Option<Document>, Error> {
        let pool = self.pool.clone();
        let key = key.clone();

        tokio::task::spawn_blocking(move || -> Result<Option<Document>, Error> {
            let mut conn = Self::connection(&pool)?;

            let select = conn.exec_first::<String, _, _>(
                "SELECT data FROM documents WHERE collection = :collection AND id = :id",
                params! { "collection" => key.collection.as_str(), "id" => key.id.as_str() },
            )?;

            select.map(|data| decode_document(&key, &data, DRIVER)).transpose()
        })
        .await
        .map_err(|e| (e, DRIVER))?
    }
}

#[cfg(test)]
mod tests {
    use super::Mysql;
    use crate::core::databases::error::Error;

    #[test]
    fn it_should_reject_a_malformed_connection_url() {
        let result = Mysql::new("not a mysql url");

        assert!(matches!(result, Err(Error::ConnectionError { .. })));
    }
}
