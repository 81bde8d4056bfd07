//! Initialize configuration from file or env vars.
//!
//! The configuration sources, in increasing priority, are:
//!
//! 1. The default values.
//! 2. The TOML file at [`DEFAULT_PATH_CONFIG`], or at the path in the
//!    `ESCROW_HEALTH_CONFIG_TOML_PATH` env var. A missing file is ignored.
//! 3. The TOML document in the `ESCROW_HEALTH_CONFIG_TOML` env var. It
//!    replaces the file.
//! 4. The deployment env vars `RPC_URL`, `CHAIN_ID`, `NODE_ENV` and
//!    `APP_VERSION`.
//! 5. Env vars prefixed with `ESCROW_HEALTH_`, for example
//!    `ESCROW_HEALTH_HEALTH_CHECK_API__BIND_ADDRESS`.
//!
//! Refer to the `escrow-health-configuration` package for the options.
use escrow_health_configuration::{Configuration, Info};

// Default values
pub const DEFAULT_PATH_CONFIG: &str = "./share/default/config/health.toml";

/// It loads the application configuration from the environment.
///
/// # Panics
///
/// Will panic if the configuration can't be loaded or it is not valid.
#[must_use]
pub fn initialize_configuration() -> Configuration {
    let info = Info::new(DEFAULT_PATH_CONFIG.to_owned()).expect("it should be able to obtain the configuration info");

    match Configuration::load(&info) {
        Ok(config) => config,
        Err(err) => panic!("Invalid configuration: {err}"),
    }
}
