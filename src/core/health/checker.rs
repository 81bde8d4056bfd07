//! The health checker.
//!
//! [`HealthChecker`] owns a handle to every probed dependency. They are
//! injected as trait objects so the checker can run against the real
//! services, against local replacements, or against mocks.
use std::any::Any;
use std::collections::BTreeMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use escrow_health_configuration::{Configuration, Metadata};
use futures::FutureExt as _;
use tracing::{debug, instrument, warn};

use super::memory::{MemorySampler, ProcessMemory};
use super::{sentinel, Error, HealthReport, Probe, ProbeResult, Status};
use crate::core::auth::AuthService;
use crate::core::blockchain::ChainClient;
use crate::core::databases::Database;
use crate::shared::clock;

pub struct HealthChecker {
    database: Arc<dyn Database>,
    auth: Arc<dyn AuthService>,
    chain: Arc<dyn ChainClient>,
    memory: Arc<dyn MemorySampler>,
    chain_id: u64,
    metadata: Metadata,
    probe_timeout: Duration,
}

impl HealthChecker {
    #[must_use]
    pub fn new(
        config: &Configuration,
        database: Arc<dyn Database>,
        auth: Arc<dyn AuthService>,
        chain: Arc<dyn ChainClient>,
    ) -> Self {
        Self {
            database,
            auth,
            chain,
            memory: Arc::new(ProcessMemory),
            chain_id: config.blockchain.chain_id,
            metadata: config.metadata.clone(),
            probe_timeout: config.probe_timeout(),
        }
    }

    /// Replaces the sampler of the memory figures, which by default inspects
    /// the current process.
    #[must_use]
    pub fn with_memory_sampler(self, memory: Arc<dyn MemorySampler>) -> Self {
        Self { memory, ..self }
    }

    /// Ensures the sentinel record exists and reads it back.
    pub async fn check_database(&self) -> ProbeResult {
        let start = Instant::now();

        let outcome = match sentinel::ensure(self.database.as_ref()).await {
            Ok(created) => {
                if created {
                    debug!(driver = %self.database.driver(), "sentinel record created");
                }

                sentinel::read(self.database.as_ref()).await
            }
            Err(err) => Err(err),
        };

        match outcome {
            Ok(Some(_)) => ProbeResult::ok(start.elapsed()),
            Ok(None) => ProbeResult::failed(start.elapsed(), format!("sentinel record {} not found", sentinel::sentinel_key())),
            Err(err) => ProbeResult::failed(start.elapsed(), err.to_string()),
        }
    }

    /// Obtains a client for the authentication service.
    #[must_use]
    pub fn check_auth(&self) -> ProbeResult {
        let start = Instant::now();

        match self.auth.client() {
            Ok(_client) => ProbeResult::ok(start.elapsed()),
            Err(err) => ProbeResult::failed(start.elapsed(), err.to_string()),
        }
    }

    /// Asks the chain for its current block number.
    pub async fn check_blockchain(&self) -> ProbeResult {
        let start = Instant::now();

        match self.chain.block_number().await {
            Ok(block_number) => {
                debug!(block_number, chain_id = self.chain_id, "chain endpoint answered");

                ProbeResult::ok(start.elapsed()).with_chain_id(self.chain_id)
            }
            Err(err) => ProbeResult::failed(start.elapsed(), err.to_string()),
        }
    }

    /// Runs every probe concurrently and builds the report.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the report can not be built. Failing probes are
    /// not errors.
    #[instrument(skip(self))]
    pub async fn get_health(&self) -> Result<HealthReport, Error> {
        let start = Instant::now();
        let timestamp = clock::now();

        let (database, auth, blockchain) = tokio::join!(
            isolate(Probe::Database, self.probe_timeout, self.check_database()),
            isolate(Probe::Auth, self.probe_timeout, async { self.check_auth() }),
            isolate(Probe::Blockchain, self.probe_timeout, self.check_blockchain()),
        );

        let checks = BTreeMap::from([
            (Probe::Database, database),
            (Probe::Auth, auth),
            (Probe::Blockchain, blockchain),
        ]);

        for (probe, result) in &checks {
            let elapsed_ms = clock::as_millis_f64(result.elapsed);

            match &result.error {
                None => debug!(%probe, elapsed_ms, "probe passed"),
                Some(error) => warn!(%probe, elapsed_ms, error = error.as_str(), "probe failed"),
            }
        }

        let memory = self.memory.sample()?;

        Ok(HealthReport {
            status: Status::from_checks(&checks),
            timestamp,
            environment: self.metadata.environment.clone(),
            version: self.metadata.version.clone(),
            uptime: clock::uptime(),
            memory,
            checks,
            total_elapsed: start.elapsed(),
        })
    }
}

/// Runs a probe so that neither a panic nor a hang escapes it.
async fn isolate<F>(probe: Probe, timeout: Duration, check: F) -> ProbeResult
where
    F: Future<Output = ProbeResult>,
{
    let start = Instant::now();

    match tokio::time::timeout(timeout, AssertUnwindSafe(check).catch_unwind()).await {
        Ok(Ok(result)) => result,
        Ok(Err(panic)) => ProbeResult::failed(
            start.elapsed(),
            format!("{probe} probe panicked: {}", panic_message(panic.as_ref())),
        ),
        Err(_elapsed) => ProbeResult::failed(
            start.elapsed(),
            format!("{probe} probe timed out after {} ms", timeout.as_millis()),
        ),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
