//! Blockchain JSON-RPC client.
//!
//! The escrow contracts live on an EVM chain reached through a JSON-RPC
//! endpoint. The health service uses the current block number as a liveness
//! proxy for that endpoint:
//!
//! ```text
//! --> {"jsonrpc":"2.0","method":"eth_blockNumber","params":[],"id":1}
//! <-- {"jsonrpc":"2.0","id":1,"result":"0x12a05f2"}
//! ```
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::shared::error::{display_chain, DynError};

/// Errors querying the JSON-RPC endpoint.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// The request could not be sent or the response could not be read. For
    /// example: connection refused or timeout.
    #[error("{message}")]
    Unreachable {
        message: String,
        location: &'static Location<'static>,
    },

    #[error("The RPC endpoint answered with HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("The RPC endpoint returned error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("The RPC endpoint returned an invalid block number: {result}")]
    InvalidBlockNumber { result: String },

    #[error("Unable to build the RPC HTTP client: {source}")]
    UnableToBuildClient { source: DynError },
}

impl From<reqwest::Error> for Error {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::Unreachable {
            message: display_chain(&err),
            location: Location::caller(),
        }
    }
}

/// Read access to the chain the escrow contracts are deployed on.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChainClient: Sync + Send {
    /// The number of the most recent block.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the endpoint can not be reached or its answer is
    /// not a block number.
    async fn block_number(&self) -> Result<u64, Error>;
}

#[derive(Serialize, Debug)]
struct Request<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: [Value; 0],
    id: u64,
}

#[derive(Deserialize, Debug)]
struct Response {
    result: Option<Value>,
    error: Option<RpcError>,
}

#[derive(Deserialize, Debug)]
struct RpcError {
    code: i64,
    message: String,
}

/// A JSON-RPC 2.0 client over HTTP.
#[derive(Clone, Debug)]
pub struct JsonRpcClient {
    client: reqwest::Client,
    url: Url,
}

impl JsonRpcClient {
    /// # Errors
    ///
    /// Will return `Err` if the HTTP client can not be built.
    pub fn new(url: Url, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| Error::UnableToBuildClient { source: Arc::new(err) })?;

        Ok(Self { client, url })
    }

    async fn call(&self, method: &str) -> Result<Value, Error> {
        let request = Request {
            jsonrpc: "2.0",
            method,
            params: [],
            id: 1,
        };

        let response = self.client.post(self.url.clone()).json(&request).send().await?;

        let status = response.status();

        if !status.is_success() {
            return Err(Error::HttpStatus { status: status.as_u16() });
        }

        let response = response.json::<Response>().await?;

        if let Some(error) = response.error {
            return Err(Error::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        Ok(response.result.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl ChainClient for JsonRpcClient {
    async fn block_number(&self) -> Result<u64, Error> {
        let result = self.call("eth_blockNumber").await?;

        parse_quantity(&result)
    }
}

/// Parses a JSON-RPC `QUANTITY`: a `0x` prefixed hexadecimal string.
fn parse_quantity(result: &Value) -> Result<u64, Error> {
    result
        .as_str()
        .and_then(|text| text.strip_prefix("0x"))
        .filter(|digits| !digits.is_empty())
        .and_then(|digits| u64::from_str_radix(digits, 16).ok())
        .ok_or_else(|| Error::InvalidBlockNumber { result: result.to_string() })
}
