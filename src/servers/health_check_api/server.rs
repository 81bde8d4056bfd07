//! Logic to run the Health Check HTTP API server.
use std::net::SocketAddr;
use std::sync::Arc;

use axum_server::Handle;
use futures::Future;
use tokio::sync::oneshot::{Receiver, Sender};

use super::v0::routes::router;
use super::HEALTH_CHECK_API_LOG_TARGET;
use crate::bootstrap::jobs::Started;
use crate::core::health::checker::HealthChecker;
use crate::servers::signals::{graceful_shutdown, Halted};

/// Starts Health Check API server.
///
/// The `base_path` is where the endpoints are mounted, for example
/// `/api/health`.
///
/// # Panics
///
/// Will panic if binding to the socket address fails.
pub fn start(
    bind_to: SocketAddr,
    base_path: &str,
    tx: Sender<Started>,
    rx_halt: Receiver<Halted>,
    checker: Arc<HealthChecker>,
) -> impl Future<Output = Result<(), std::io::Error>> {
    let socket = std::net::TcpListener::bind(bind_to).expect("Could not bind tcp_listener to address.");
    socket
        .set_nonblocking(true)
        .expect("Could not set the tcp_listener to non-blocking mode.");
    let address = socket.local_addr().expect("Could not get local_addr from tcp_listener.");

    let router = router(checker, base_path, address);

    let handle = Handle::new();

    tracing::debug!(target: HEALTH_CHECK_API_LOG_TARGET, "Starting service with graceful shutdown in a spawned task ...");

    tokio::task::spawn(graceful_shutdown(
        handle.clone(),
        rx_halt,
        format!("Shutting down http server on socket address: {address}"),
    ));

    let running = axum_server::from_tcp(socket)
        .handle(handle)
        .serve(router.into_make_service_with_connect_info::<SocketAddr>());

    tx.send(Started {
        address,
        base_path: base_path.to_owned(),
    })
    .expect("the Health Check API server should not be dropped");

    running
}
