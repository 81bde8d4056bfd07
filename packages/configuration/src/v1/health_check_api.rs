use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

/// Configuration for the Health Check API.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct HealthCheckApi {
    /// The address the API will bind to.
    /// The format is `ip:port`, for example `127.0.0.1:1313`. If you want to
    /// listen to all interfaces, use `0.0.0.0`. If you want the operating
    /// system to choose a random port, use port `0`.
    #[serde(default = "HealthCheckApi::default_bind_address")]
    pub bind_address: SocketAddr,

    /// Mount point of the health routes, for example `/api/health`. Use `/`
    /// to serve them from the root.
    #[serde(default = "HealthCheckApi::default_base_path")]
    pub base_path: String,

    /// Maximum time in seconds a single probe may take before it is reported
    /// as failed.
    #[serde(default = "HealthCheckApi::default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

impl Default for HealthCheckApi {
    fn default() -> Self {
        Self {
            bind_address: Self::default_bind_address(),
            base_path: Self::default_base_path(),
            probe_timeout_secs: Self::default_probe_timeout_secs(),
        }
    }
}

impl HealthCheckApi {
    fn default_bind_address() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 1313)
    }

    fn default_base_path() -> String {
        String::from("/api/health")
    }

    fn default_probe_timeout_secs() -> u64 {
        crate::DEFAULT_TIMEOUT.as_secs()
    }
}
