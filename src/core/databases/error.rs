//! Database errors.
//!
//! This module contains the [Database errors](crate::core::databases::error::Error).
use std::panic::Location;
use std::path::Path;
use std::sync::Arc;

use escrow_health_configuration::DatabaseDriver as Driver;
use r2d2_mysql::mysql::UrlError;

use crate::shared::error::{display_chain, DynError};

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// The database could not be reached. The message is the one of the
    /// underlying client, for example `connection refused`.
    #[error("{message}")]
    Unreachable {
        message: String,
        driver: Driver,
        location: &'static Location<'static>,
    },

    /// The directory of a file based database could not be created.
    #[error("Unable to create the {driver} database directory {path}: {source}")]
    StorageUnavailable {
        path: String,
        source: Arc<std::io::Error>,
        driver: Driver,
        location: &'static Location<'static>,
    },

    /// The query was malformed.
    #[error("The {driver} query was malformed: {source}")]
    InvalidQuery {
        source: DynError,
        driver: Driver,
        location: &'static Location<'static>,
    },

    /// A stored document could not be decoded.
    #[error("The {driver} document {key} is not valid: {message}")]
    InvalidDocument { key: String, message: String, driver: Driver },

    /// A remote document store answered with an unexpected status code.
    #[error("The {driver} service answered {status} for {key}: {body}")]
    UnexpectedResponse {
        key: String,
        status: u16,
        body: String,
        driver: Driver,
    },

    /// The configured endpoint can not be used as a base URL.
    #[error("Invalid {driver} endpoint: {url}")]
    InvalidEndpoint { url: String, driver: Driver },

    /// The connection URL is malformed.
    #[error("Failed to connect to {driver} database: {source}")]
    ConnectionError {
        source: Arc<UrlError>,
        driver: Driver,
        location: &'static Location<'static>,
    },

    /// The blocking worker running the query died.
    #[error("The {driver} worker task failed: {message}")]
    TaskFailed { message: String, driver: Driver },
}

impl Error {
    #[track_caller]
    pub fn unreachable(err: &(dyn std::error::Error + 'static), driver: Driver) -> Self {
        Self::Unreachable {
            message: display_chain(err),
            driver,
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn storage_unavailable(err: std::io::Error, path: &Path, driver: Driver) -> Self {
        Self::StorageUnavailable {
            path: path.display().to_string(),
            source: Arc::new(err),
            driver,
            location: Location::caller(),
        }
    }
}

impl From<r2d2_sqlite::rusqlite::Error> for Error {
    #[track_caller]
    fn from(err: r2d2_sqlite::rusqlite::Error) -> Self {
        Error::InvalidQuery {
            source: Arc::new(err) as DynError,
            driver: Driver::Sqlite3,
            location: Location::caller(),
        }
    }
}

impl From<r2d2_mysql::mysql::Error> for Error {
    #[track_caller]
    fn from(err: r2d2_mysql::mysql::Error) -> Self {
        match err {
            r2d2_mysql::mysql::Error::IoError(_) | r2d2_mysql::mysql::Error::DriverError(_) => {
                Error::unreachable(&err, Driver::MySQL)
            }
            _ => Error::InvalidQuery {
                source: Arc::new(err) as DynError,
                driver: Driver::MySQL,
                location: Location::caller(),
            },
        }
    }
}

impl From<UrlError> for Error {
    #[track_caller]
    fn from(err: UrlError) -> Self {
        Self::ConnectionError {
            source: Arc::new(err),
            driver: Driver::MySQL,
            location: Location::caller(),
        }
    }
}

impl From<(r2d2::Error, Driver)> for Error {
    #[track_caller]
    fn from(e: (r2d2::Error, Driver)) -> Self {
        let (err, driver) = e;
        Error::unreachable(&err, driver)
    }
}

impl From<(reqwest::Error, Driver)> for Error {
    #[track_caller]
    fn from(e: (reqwest::Error, Driver)) -> Self {
        let (err, driver) = e;
        Error::unreachable(&err, driver)
    }
}

impl From<(tokio::task::JoinError, Driver)> for Error {
    fn from(e: (tokio::task::JoinError, Driver)) -> Self {
        let (err, driver) = e;
        Error::TaskFailed {
            message: err.to_string(),
            driver,
        }
    }
}
