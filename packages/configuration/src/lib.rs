//! Configuration data structures for the escrow health service.
//!
//! This module contains the configuration data structures for the health,
//! readiness and liveness service of the escrow backend.
//!
//! The current version for configuration is [`v1`].
//!
//! Configuration is loaded with [`figment`] from these sources, in increasing
//! order of priority:
//!
//! 1. The built-in defaults.
//! 2. A TOML file, or the whole TOML content in the
//!    `ESCROW_HEALTH_CONFIG_TOML` environment variable.
//! 3. The conventional deployment variables: `RPC_URL`, `CHAIN_ID`,
//!    `NODE_ENV` and `APP_VERSION`.
//! 4. Environment variables prefixed with `ESCROW_HEALTH_`, using `__` to
//!    separate nested keys. For example:
//!    `ESCROW_HEALTH_BLOCKCHAIN__REQUEST_TIMEOUT_SECS=2`.
pub mod v1;
pub mod validator;

use std::env;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// Default timeout for the outbound checks: the per-probe deadline and the
/// JSON-RPC request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

// Environment variables

/// The whole `health.toml` file content. It has priority over the config file.
/// Even if the file is not on the default path.
pub const ENV_VAR_CONFIG_TOML: &str = "ESCROW_HEALTH_CONFIG_TOML";

/// The `health.toml` file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "ESCROW_HEALTH_CONFIG_TOML_PATH";

/// Prefix for the environment variables overriding single options.
pub const CONFIG_OVERRIDE_PREFIX: &str = "ESCROW_HEALTH_";

/// Separator for nested keys in the prefixed environment variables.
pub const CONFIG_OVERRIDE_SEPARATOR: &str = "__";

pub type Configuration = v1::Configuration;
pub type Metadata = v1::metadata::Metadata;
pub type Logging = v1::logging::Logging;
pub type Threshold = v1::logging::Threshold;
pub type LogStyle = v1::logging::LogStyle;
pub type HealthCheckApi = v1::health_check_api::HealthCheckApi;
pub type Database = v1::database::Database;
pub type DatabaseDriver = v1::database::Driver;
pub type Firestore = v1::database::Firestore;
pub type Auth = v1::auth::Auth;
pub type Blockchain = v1::blockchain::Blockchain;

/// Information required for loading config
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

impl Info {
    /// Build Configuration Info
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to obtain a configuration.
    ///
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(default_config_toml_path: String) -> Result<Self, Error> {
        let config_toml = if let Ok(config_toml) = env::var(ENV_VAR_CONFIG_TOML) {
            println!("Loading configuration from environment variable:\n {config_toml}");
            Some(config_toml)
        } else {
            None
        };

        let config_toml_path = if let Ok(config_toml_path) = env::var(ENV_VAR_CONFIG_TOML_PATH) {
            println!("Loading configuration from file: `{config_toml_path}` ...");
            config_toml_path
        } else {
            println!("Loading configuration from default configuration file: `{default_config_toml_path}` ...");
            default_config_toml_path
        };

        Ok(Self {
            config_toml,
            config_toml_path,
        })
    }

    /// Info that only uses an inline TOML document.
    #[must_use]
    pub fn from_toml(config_toml: &str) -> Self {
        Self {
            config_toml: Some(config_toml.to_owned()),
            config_toml_path: String::new(),
        }
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Unable to merge or extract the configuration sources.
    #[error("Failed processing the configuration: {source}, {location}")]
    ConfigError {
        source: Arc<figment::Error>,
        location: &'static Location<'static>,
    },

    /// The configuration was parsed but it is not semantically valid.
    #[error("Invalid configuration: {source}")]
    Invalid {
        #[from]
        source: validator::SemanticValidationError,
    },
}

impl From<figment::Error> for Error {
    #[track_caller]
    fn from(err: figment::Error) -> Self {
        Self::ConfigError {
            source: Arc::new(err),
            location: Location::caller(),
        }
    }
}
