//! This module contains functions to handle signals.
use std::time::Duration;

use derive_more::Display;
use tokio::time::sleep;
use tracing::info;

/// Time given to open connections to finish after a shutdown was requested.
const GRACE_PERIOD: Duration = Duration::from_secs(10);

/// This is the message that the "launcher" spawned task receives from the main
/// application process to notify the service to shutdown.
///
#[derive(Copy, Clone, Debug, Display)]
pub enum Halted {
    Normal,
}

/// Resolves on `ctrl_c` or the `terminate` signal.
///
/// # Panics
///
/// Will panic if the `ctrl_c` or `terminate` signal resolves with an error.
pub async fn global_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {}
    }
}

/// Resolves when the `rx_halt` or the `global_shutdown_signal()` resolves.
///
/// A dropped halt sender is not a halt: the server keeps running until the
/// process receives a signal.
pub async fn shutdown_signal(rx_halt: tokio::sync::oneshot::Receiver<Halted>) {
    let halt = async {
        match rx_halt.await {
            Ok(signal) => signal,
            Err(_closed) => std::future::pending().await,
        }
    };

    tokio::select! {
        signal = halt => { info!("Halt signal processed: {}", signal) },
        () = global_shutdown_signal() => { info!("Global shutdown signal processed") }
    }
}

/// Same as `shutdown_signal()`, but shows a message when it resolves.
pub async fn shutdown_signal_with_message(rx_halt: tokio::sync::oneshot::Receiver<Halted>, message: String) {
    shutdown_signal(rx_halt).await;

    info!("{message}");
}

/// Waits for a shutdown signal and then stops the server gracefully.
pub async fn graceful_shutdown(handle: axum_server::Handle, rx_halt: tokio::sync::oneshot::Receiver<Halted>, message: String) {
    shutdown_signal_with_message(rx_halt, message).await;

    info!("Sending graceful shutdown signal");
    handle.graceful_shutdown(Some(GRACE_PERIOD));

    while handle.connection_count() > 0 {
        sleep(Duration::from_secs(1)).await;

        info!("remaining alive connections: {}", handle.connection_count());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{shutdown_signal, Halted};

    #[tokio::test]
    async fn it_should_resolve_when_a_halt_is_sent() {
        let (tx_halt, rx_halt) = tokio::sync::oneshot::channel::<Halted>();

        tx_halt.send(Halted::Normal).unwrap();

        tokio::time::timeout(Duration::from_secs(1), shutdown_signal(rx_halt))
            .await
            .expect("it should resolve after the halt");
    }

    #[tokio::test]
    async fn it_should_keep_waiting_when_the_halt_sender_is_dropped() {
        let (tx_halt, rx_halt) = tokio::sync::oneshot::channel::<Halted>();

        drop(tx_halt);

        let waited = tokio::time::timeout(Duration::from_millis(100), shutdown_signal(rx_halt)).await;

        assert!(waited.is_err());
    }
}
