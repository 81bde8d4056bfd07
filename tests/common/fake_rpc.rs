//! A fake chain JSON-RPC endpoint.
//!
//! It only knows `eth_blockNumber`. Any other method gets the standard
//! "method not found" error object.
use std::net::SocketAddr;

use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use url::Url;

pub struct FakeRpcServer {
    pub url: Url,
    job: JoinHandle<()>,
}

impl FakeRpcServer {
    /// Starts a server that always answers with `block_number`.
    ///
    /// # Panics
    ///
    /// Will panic if the server can't be bound to an ephemeral port.
    pub async fn start(block_number: u64) -> Self {
        let router = Router::new().route(
            "/",
            post(move |Json(request): Json<Value>| async move {
                if request["method"] == "eth_blockNumber" {
                    Json(json!({ "jsonrpc": "2.0", "id": request["id"], "result": format!("{block_number:#x}") }))
                } else {
                    Json(json!({ "jsonrpc": "2.0", "id": request["id"], "error": { "code": -32601, "message": "method not found" } }))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();

        let job = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            url: Url::parse(&format!("http://{addr}/")).unwrap(),
            job,
        }
    }

    pub fn stop(self) {
        self.job.abort();
    }
}
