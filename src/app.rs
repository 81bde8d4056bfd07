//! Escrow health application.
//!
//! The application has a global configuration for its only job, the Health
//! Check API. It's basically a container for that service.
//!
//! The application is responsible for starting the jobs. The database, the
//! auth service and the chain are not contacted at startup: they are probed
//! on demand, when a health report is requested, so the service starts and
//! reports even when its dependencies are down.
use std::future::Future;
use std::sync::Arc;

use escrow_health_configuration::Configuration;
use tokio::task::JoinHandle;

use crate::bootstrap::jobs::health_check_api;
use crate::core::health::checker::HealthChecker;

/// It starts the application jobs.
pub async fn start(config: &Configuration, checker: Arc<HealthChecker>) -> Vec<JoinHandle<()>> {
    let mut jobs: Vec<JoinHandle<()>> = Vec::new();

    // Start Health Check API
    jobs.push(health_check_api::start_job(&config.health_check_api, checker).await);

    jobs
}

/// Waits for the shutdown `signal` and then for every job to finish.
pub async fn wait_for_shutdown<S>(signal: S, jobs: Vec<JoinHandle<()>>)
where
    S: Future<Output = ()>,
{
    signal.await;

    tracing::info!("Escrow health service shutting down ...");

    futures::future::join_all(jobs).await;

    tracing::info!("Escrow health service successfully shutdown.");
}
