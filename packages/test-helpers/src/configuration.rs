//! Health service configuration factories for testing.
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use escrow_health_configuration::{Configuration, DatabaseDriver, Threshold};
use url::Url;

use crate::random;

/// This configuration is used for testing. It generates random config values
/// so they do not collide if you run more than one service at the same time.
///
/// - The API binds to an ephemeral port on the loopback interface.
/// - The database is a new `SQLite` file in the temp directory.
/// - The auth service has a fake project and API key, so it is healthy.
/// - The RPC endpoint points to a port nobody listens on. Tests that need a
///   healthy chain should replace it with their own endpoint.
///
/// # Panics
///
/// Will panic if it can't convert the temp file path to string.
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Off; // Change to `debug` for tests debugging

    config.metadata.environment = "test".to_owned();

    // Ephemeral socket address for the API
    let api_port = 0u16;
    config.health_check_api.bind_address = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), api_port);
    config.health_check_api.probe_timeout_secs = 2;

    // Ephemeral sqlite database
    let temp_directory = env::temp_dir();
    let random_db_id = random::string(16);
    let temp_file = temp_directory.join(format!("data_{random_db_id}.db"));
    config.database.driver = DatabaseDriver::Sqlite3;
    temp_file.to_str().unwrap().clone_into(&mut config.database.path);

    // Fake Firebase project
    config.auth.project_id = format!("escrow-test-{}", random::string(6).to_lowercase());
    config.auth.api_key = random::string(39);

    // Unreachable RPC endpoint
    config.blockchain.rpc_url = Url::parse("http://127.0.0.1:1/").unwrap();
    config.blockchain.chain_id = 31337;
    config.blockchain.request_timeout_secs = 1;

    config
}

/// Ephemeral configuration where every external dependency is unreachable or
/// misconfigured.
///
/// # Panics
///
/// Will panic if the placeholder URL is invalid.
#[must_use]
pub fn ephemeral_with_failing_dependencies() -> Configuration {
    let mut config = ephemeral();

    // A database file whose directory can not be created
    config.database.path = format!("/dev/null/data_{}.db", random::string(16));

    // No Firebase credentials
    config.auth.project_id = String::new();
    config.auth.api_key = String::new();

    config
}
