//! Version `1` of the configuration.
//!
//! This is the only version of the configuration for the escrow health
//! service. A complete configuration file looks like this:
//!
//! ```toml
//! [metadata]
//! environment = "production"
//! version = "1.4.0"
//!
//! [logging]
//! threshold = "info"
//! style = "json"
//!
//! [health_check_api]
//! bind_address = "0.0.0.0:1313"
//! base_path = "/api/health"
//! probe_timeout_secs = 5
//!
//! [database]
//! driver = "Firestore"
//!
//! [database.firestore]
//! project_id = "escrow-prod"
//!
//! [auth]
//! project_id = "escrow-prod"
//! api_key = "AIza..."
//!
//! [blockchain]
//! rpc_url = "https://sepolia.base.org"
//! chain_id = 84532
//! request_timeout_secs = 5
//! ```
//!
//! Every section and option is optional. Missing values take their defaults.
pub mod auth;
pub mod blockchain;
pub mod database;
pub mod health_check_api;
pub mod logging;
pub mod metadata;

use std::{env, fs};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use self::auth::Auth;
use self::blockchain::Blockchain;
use self::database::{Database, Driver};
use self::health_check_api::HealthCheckApi;
use self::logging::Logging;
use self::metadata::Metadata;
use crate::validator::{SemanticValidationError, Validator};
use crate::{Error, Info, CONFIG_OVERRIDE_PREFIX, CONFIG_OVERRIDE_SEPARATOR, ENV_VAR_CONFIG_TOML, ENV_VAR_CONFIG_TOML_PATH};

/// Chain variables shared with the rest of the escrow deployment. They are
/// read without prefix.
const CHAIN_ENV_VARS: [&str; 2] = ["RPC_URL", "CHAIN_ID"];

/// Deployment metadata variables and the option each one sets. Their values
/// are always taken as plain strings, so `APP_VERSION=2` stays `"2"`.
const METADATA_ENV_VARS: [(&str, &str); 2] = [
    ("NODE_ENV", "metadata.environment"),
    ("APP_VERSION", "metadata.version"),
];

/// Core configuration for the health service.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Default, Clone)]
pub struct Configuration {
    /// Deployment information.
    #[serde(default)]
    pub metadata: Metadata,

    /// Logging configuration.
    #[serde(default)]
    pub logging: Logging,

    /// The Health Check API configuration.
    #[serde(default)]
    pub health_check_api: HealthCheckApi,

    /// Persistence layer checked by the database probe.
    #[serde(default)]
    pub database: Database,

    /// Authentication service checked by the auth probe.
    #[serde(default)]
    pub auth: Auth,

    /// JSON-RPC endpoint checked by the blockchain probe.
    #[serde(default)]
    pub blockchain: Blockchain,
}

impl Configuration {
    /// Loads the configuration from the `Info` struct. The whole
    /// configuration in toml format is included in the `info.config_toml`
    /// string, otherwise it is read from `info.config_toml_path`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the sources can't be merged, the result does not
    /// fit the configuration types, or it is semantically invalid.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = Figment::from(Serialized::defaults(Configuration::default()));

        let figment = if let Some(config_toml) = &info.config_toml {
            figment.merge(Toml::string(config_toml))
        } else {
            figment.merge(Toml::file(&info.config_toml_path))
        };

        let figment = figment.merge(Env::raw().only(&CHAIN_ENV_VARS).map(|key| {
            if key.as_str().eq_ignore_ascii_case("RPC_URL") {
                "blockchain.rpc_url".into()
            } else {
                "blockchain.chain_id".into()
            }
        }));

        let figment = METADATA_ENV_VARS
            .iter()
            .filter_map(|(var, option)| env::var(var).ok().map(|value| (*option, value)))
            .fold(figment, |figment, (option, value)| {
                figment.merge(Serialized::default(option, value))
            });

        let figment = figment.merge(
            Env::prefixed(CONFIG_OVERRIDE_PREFIX)
                .ignore(&[
                    &ENV_VAR_CONFIG_TOML[CONFIG_OVERRIDE_PREFIX.len()..],
                    &ENV_VAR_CONFIG_TOML_PATH[CONFIG_OVERRIDE_PREFIX.len()..],
                ])
                .split(CONFIG_OVERRIDE_SEPARATOR),
        );

        let config: Configuration = figment.extract()?;

        config.validate()?;

        Ok(config)
    }

    /// Loads the configuration from the configuration file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `path` has a bad configuration.
    pub fn load_from_file(path: &str) -> Result<Configuration, Error> {
        Self::load(&Info {
            config_toml: None,
            config_toml_path: path.to_owned(),
        })
    }

    /// Saves the configuration to the configuration file.
    ///
    /// # Panics
    ///
    /// Will panic if the configuration cannot be written into the file.
    pub fn save_to_file(&self, path: &str) {
        fs::write(path, self.to_toml()).expect("Could not write to file!");
    }

    /// Encodes the configuration to TOML.
    ///
    /// # Panics
    ///
    /// Will panic if the configuration cannot be encoded.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string(self).expect("Could not encode TOML value")
    }

    #[must_use]
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.health_check_api.probe_timeout_secs)
    }

    #[must_use]
    pub fn rpc_request_timeout(&self) -> Duration {
        Duration::from_secs(self.blockchain.request_timeout_secs)
    }
}

impl Validator for Configuration {
    fn validate(&self) -> Result<(), SemanticValidationError> {
        if !self.health_check_api.base_path.starts_with('/') {
            return Err(SemanticValidationError::RelativeBasePath {
                base_path: self.health_check_api.base_path.clone(),
            });
        }

        if self.health_check_api.probe_timeout_secs == 0 {
            return Err(SemanticValidationError::ZeroTimeout {
                option: "health_check_api.probe_timeout_secs",
            });
        }

        if self.blockchain.request_timeout_secs == 0 {
            return Err(SemanticValidationError::ZeroTimeout {
                option: "blockchain.request_timeout_secs",
            });
        }

        if self.database.driver == Driver::Firestore && self.database.firestore.project_id.is_empty() {
            return Err(SemanticValidationError::MissingFirestoreProjectId);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use std::net::SocketAddr;

    use crate::v1::database::Driver;
    use crate::v1::logging::{LogStyle, Threshold};
    use crate::v1::Configuration;
    use crate::validator::SemanticValidationError;
    use crate::{Error, Info};

    #[test]
    fn configuration_should_have_default_values() {
        let configuration = Configuration::default();

        assert_eq!(
            configuration.health_check_api.bind_address,
            "127.0.0.1:1313".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(configuration.health_check_api.base_path, "/api/health");
        assert_eq!(configuration.health_check_api.probe_timeout_secs, 5);
        assert_eq!(configuration.database.driver, Driver::Sqlite3);
        assert_eq!(configuration.blockchain.chain_id, 1);
        assert_eq!(configuration.blockchain.request_timeout_secs, 5);
        assert_eq!(configuration.metadata.environment, "development");
        assert_eq!(configuration.logging.threshold, Threshold::Info);
    }

    #[test]
    fn configuration_should_be_loaded_with_defaults_when_the_file_does_not_exist() {
        figment::Jail::expect_with(|_jail| {
            let configuration = Configuration::load_from_file("missing.toml").expect("Could not load configuration");

            assert_eq!(configuration, Configuration::default());

            Ok(())
        });
    }

    #[test]
    fn configuration_should_be_saved_in_a_toml_config_file_and_loaded_back() {
        use std::env;

        use uuid::Uuid;

        let temp_file = env::temp_dir().join(format!("test_config_{}.toml", Uuid::new_v4()));
        let path = temp_file.to_string_lossy().to_string();

        let mut configuration = Configuration::default();
        configuration.metadata.environment = "staging".to_owned();
        configuration.blockchain.chain_id = 84532;

        configuration.save_to_file(&path);

        figment::Jail::expect_with(|_jail| {
            let loaded = Configuration::load_from_file(&path).expect("Could not load configuration from file");

            assert_eq!(loaded, configuration);

            Ok(())
        });
    }

    #[test]
    fn configuration_should_be_loaded_from_a_partial_toml_string() {
        figment::Jail::expect_with(|_jail| {
            let info = Info::from_toml(
                r#"
                [logging]
                threshold = "debug"
                style = "json"

                [blockchain]
                rpc_url = "https://sepolia.base.org/"
                chain_id = 84532
                "#,
            );

            let configuration = Configuration::load(&info).expect("Could not load configuration");

            assert_eq!(configuration.logging.threshold, Threshold::Debug);
            assert_eq!(configuration.logging.style, LogStyle::Json);
            assert_eq!(configuration.blockchain.rpc_url.as_str(), "https://sepolia.base.org/");
            assert_eq!(configuration.blockchain.chain_id, 84532);
            assert_eq!(configuration.health_check_api.base_path, "/api/health");

            Ok(())
        });
    }

    #[test]
    fn configuration_should_take_the_deployment_variables_from_the_environment() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("RPC_URL", "http://rpc.internal:8545/");
            jail.set_env("CHAIN_ID", "137");
            jail.set_env("NODE_ENV", "production");
            jail.set_env("APP_VERSION", "2.3.1");

            let configuration = Configuration::load(&Info::from_toml("")).expect("Could not load configuration");

            assert_eq!(configuration.blockchain.rpc_url.as_str(), "http://rpc.internal:8545/");
            assert_eq!(configuration.blockchain.chain_id, 137);
            assert_eq!(configuration.metadata.environment, "production");
            assert_eq!(configuration.metadata.version, "2.3.1");

            Ok(())
        });
    }

    #[test]
    fn configuration_should_keep_numeric_looking_deployment_metadata_as_text() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("APP_VERSION", "2");
            jail.set_env("NODE_ENV", "1.0");

            let configuration = Configuration::load(&Info::from_toml("")).expect("Could not load configuration");

            assert_eq!(configuration.metadata.version, "2");
            assert_eq!(configuration.metadata.environment, "1.0");

            jail.set_env("APP_VERSION", "1.0");

            let configuration = Configuration::load(&Info::from_toml("")).expect("Could not load configuration");

            assert_eq!(configuration.metadata.version, "1.0");

            Ok(())
        });
    }

    #[test]
    fn configuration_should_allow_to_overwrite_nested_options_with_prefixed_variables() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CHAIN_ID", "137");
            jail.set_env("ESCROW_HEALTH_BLOCKCHAIN__CHAIN_ID", "10");
            jail.set_env("ESCROW_HEALTH_HEALTH_CHECK_API__BASE_PATH", "/health");

            let configuration = Configuration::load(&Info::from_toml("")).expect("Could not load configuration");

            assert_eq!(configuration.blockchain.chain_id, 10);
            assert_eq!(configuration.health_check_api.base_path, "/health");

            Ok(())
        });
    }

    #[test]
    fn configuration_should_reject_a_relative_base_path() {
        figment::Jail::expect_with(|_jail| {
            let info = Info::from_toml(
                r#"
                [health_check_api]
                base_path = "health"
                "#,
            );

            let err = Configuration::load(&info).expect_err("a relative base path should be rejected");

            assert!(matches!(
                err,
                Error::Invalid {
                    source: SemanticValidationError::RelativeBasePath { .. }
                }
            ));

            Ok(())
        });
    }

    #[test]
    fn configuration_should_require_a_project_for_the_firestore_driver() {
        figment::Jail::expect_with(|_jail| {
            let info = Info::from_toml(
                r#"
                [database]
                driver = "Firestore"
                "#,
            );

            let err = Configuration::load(&info).expect_err("a Firestore driver without project should be rejected");

            assert!(matches!(
                err,
                Error::Invalid {
                    source: SemanticValidationError::MissingFirestoreProjectId
                }
            ));

            Ok(())
        });
    }
}
