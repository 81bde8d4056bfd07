use serde::{Deserialize, Serialize};
use url::Url;

/// The blockchain JSON-RPC endpoint checked by the health service.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Blockchain {
    /// JSON-RPC endpoint. Overridden by `RPC_URL`.
    #[serde(default = "Blockchain::default_rpc_url")]
    pub rpc_url: Url,

    /// Chain the endpoint is expected to serve. Overridden by `CHAIN_ID`.
    #[serde(default = "Blockchain::default_chain_id")]
    pub chain_id: u64,

    /// Timeout in seconds for a single JSON-RPC request.
    #[serde(default = "Blockchain::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self {
            rpc_url: Self::default_rpc_url(),
            chain_id: Self::default_chain_id(),
            request_timeout_secs: Self::default_request_timeout_secs(),
        }
    }
}

impl Blockchain {
    fn default_rpc_url() -> Url {
        Url::parse("http://127.0.0.1:8545").expect("the default RPC URL should be a valid URL")
    }

    fn default_chain_id() -> u64 {
        1
    }

    fn default_request_timeout_secs() -> u64 {
        crate::DEFAULT_TIMEOUT.as_secs()
    }
}
