//! Setup for the main health service application.
//!
//! The [`setup`] only builds the application and its dependencies but it does
//! not start the application. In fact, there is only one application
//! service: the Health Check API. It is launched by the [`app`](crate::app)
//! module.
//!
//! Setup steps:
//!
//! 1. Load the global application configuration.
//! 2. Initialize static variables.
//! 3. Initialize logging.
//! 4. Build the collaborators of the health checker: database, auth service
//!    and chain client.
use std::sync::Arc;

use escrow_health_configuration::Configuration;
use thiserror::Error;

use super::config::initialize_configuration;
use crate::bootstrap;
use crate::core::auth::{self, FirebaseAuth};
use crate::core::blockchain::{self, JsonRpcClient};
use crate::core::databases;
use crate::core::health::checker::HealthChecker;
use crate::shared::clock;

/// Errors building the health checker.
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Unable to build the database driver: {source}")]
    Database {
        #[from]
        source: databases::error::Error,
    },

    #[error("Unable to build the auth service: {source}")]
    Auth {
        #[from]
        source: auth::Error,
    },

    #[error("Unable to build the chain client: {source}")]
    Blockchain {
        #[from]
        source: blockchain::Error,
    },
}

/// It loads the configuration from the environment and builds the main
/// domain [`HealthChecker`] struct.
///
/// # Panics
///
/// Will panic if the configuration is not valid or the collaborators can't
/// be built.
#[must_use]
pub fn setup() -> (Configuration, Arc<HealthChecker>) {
    let configuration = initialize_configuration();

    let checker = initialize_with_configuration(&configuration);

    (configuration, checker)
}

/// It initializes the application with the given configuration.
///
/// # Panics
///
/// Will panic if the collaborators of the health checker can't be built.
#[must_use]
pub fn initialize_with_configuration(configuration: &Configuration) -> Arc<HealthChecker> {
    initialize_static();
    initialize_logging(configuration);

    match initialize_health_checker(configuration) {
        Ok(checker) => Arc::new(checker),
        Err(err) => panic!("{err}"),
    }
}

/// It initializes the application static values.
pub fn initialize_static() {
    // Set the time of the health service starting
    lazy_static::initialize(&clock::INSTANT_AT_APP_START);
}

/// It builds the health checker with the collaborators in the configuration.
///
/// # Errors
///
/// Will return `Err` if the database driver, the auth service or the chain
/// client can't be built.
pub fn initialize_health_checker(config: &Configuration) -> Result<HealthChecker, Error> {
    let database = databases::driver::build(&config.database)?;

    let auth = Arc::new(FirebaseAuth::new(&config.auth)?);

    let chain = Arc::new(JsonRpcClient::new(
        config.blockchain.rpc_url.clone(),
        config.rpc_request_timeout(),
    )?);

    Ok(HealthChecker::new(config, database, auth, chain))
}

/// It initializes the log threshold, format and channel.
///
/// See [the logging setup](crate::bootstrap::logging::setup) for more info about logging.
pub fn initialize_logging(config: &Configuration) {
    bootstrap::logging::setup(config);
}
