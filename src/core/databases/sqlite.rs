//! The `SQLite3` database driver.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use escrow_health_configuration::DatabaseDriver as Driver;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::rusqlite::OptionalExtension;
use r2d2_sqlite::SqliteConnectionManager;

use super::{decode_document, Database, Document, DocumentKey, Error};

const DRIVER: Driver = Driver::Sqlite3;

/// Maximum time to wait for a pooled connection.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(3);

const CREATE_DOCUMENTS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS documents (
        collection TEXT NOT NULL,
        id TEXT NOT NULL,
        data TEXT NOT NULL,
        PRIMARY KEY (collection, id)
    );";

pub struct Sqlite {
    pool: Pool<SqliteConnectionManager>,
    directory: Option<PathBuf>,
}

impl Sqlite {
    /// It instantiates a new `SQLite3` database driver.
    ///
    /// No connection is opened until the first query. The directory holding
    /// the database file is created then too.
    #[must_use]
    pub fn new(db_path: &str) -> Self {
        let cm = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .min_idle(Some(0))
            .connection_timeout(CONNECTION_TIMEOUT)
            .build_unchecked(cm);

        let directory = Path::new(db_path)
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf);

        Self { pool, directory }
    }

    fn connection(
        pool: &Pool<SqliteConnectionManager>,
        directory: Option<&Path>,
    ) -> Result<PooledConnection<SqliteConnectionManager>, Error> {
        if let Some(directory) = directory {
            fs::create_dir_all(directory).map_err(|err| Error::storage_unavailable(err, directory, DRIVER))?;
        }

        let conn = pool.get().map_err(|e| (e, DRIVER))?;

        conn.execute(CREATE_DOCUMENTS_TABLE, [])?;

        Ok(conn)
    }
}

#[async_trait]
impl Database for Sqlite {
    fn driver(&self) -> Driver {
        DRIVER
    }

    /// Refer to [`databases::Database::create_document_if_absent`](crate::core::databases::Database::create_document_if_absent).
    async fn create_document_if_absent(&self, key: &DocumentKey, document: &Document) -> Result<bool, Error> {
        let pool = self.pool.clone();
        let directory = self.directory.clone();
        let key = key.clone();
        let data = serde_json::Value::Object(document.clone()).to_string();

        tokio::task::spawn_blocking(move || -> Result<bool, Error> {
            let conn = Self::connection(&pool, directory.as_deref())?;

            let insert = conn.execute(
                "INSERT OR IGNORE INTO documents (collection, id, data) VALUES (?1, ?2, ?3)",
                [&key.collection, &key.id, &data],
            )?;

            Ok(insert == 1)
        })
        .await
        .map_err(|e| (e, DRIVER))?
    }

    /// Refer to [`databases::Database::get_document`](crate::core::databases::Database::get_document).
    async fn get_document(&self, key: &DocumentKey) -> Result<Option<Document>, Error> {
        let pool = self.pool.clone();
        let directory = self.directory.clone();
        let key = key.clone();

        tokio::task::spawn_blocking(move || -> Result<Option<Document>, Error> {
            let conn = Self::connection(&pool, directory.as_deref())?;

            let data = conn
                .query_row(
                    "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
                    [&key.collection, &key.id],
                    |row| row.get::<_, String>(0),
                )
                .optional()?;

            data.map(|data| decode_document(&key, &data, DRIVER)).transpose()
        })
        .await
        .map_err(|e| (e, DRIVER))?
    }
}
