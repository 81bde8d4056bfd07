//! Health reports.
//!
//! A health report is built by running three probes concurrently:
//!
//! Probe        | Passes when
//! ---|---
//! `database`   | The sentinel record can be ensured and read back
//! `auth`       | A client for the authentication service can be obtained
//! `blockchain` | The chain endpoint returns the current block number
//!
//! Every probe yields a [`ProbeResult`], whatever happens inside it. A probe
//! that fails, panics or does not finish in time yields an `ERROR` result
//! while the other probes still report their own outcome. The overall
//! [`Status`] is `OK` only when every probe passed, `DEGRADED` otherwise.
//!
//! Readiness and liveness do not touch any dependency. They only state that
//! the process is up.
pub mod checker;
pub mod memory;
pub mod sentinel;

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use derive_more::Display;
use thiserror::Error;

use self::memory::MemorySnapshot;
use crate::shared::clock;

/// Errors building a health report.
///
/// Probe failures are not errors: they are part of the report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unable to inspect the current process: {message}")]
    ProcessInfo { message: String },
}

/// The dependencies that are probed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Probe {
    #[display("auth")]
    Auth,
    #[display("blockchain")]
    Blockchain,
    #[display("database")]
    Database,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum ProbeStatus {
    #[display("OK")]
    Ok,
    #[display("ERROR")]
    Error,
}

/// The outcome of one probe.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbeResult {
    pub status: ProbeStatus,
    /// Wall time spent by the probe.
    pub elapsed: Duration,
    /// Why the probe failed.
    pub error: Option<String>,
    /// The configured chain id. Only for a passing `blockchain` probe.
    pub chain_id: Option<u64>,
}

impl ProbeResult {
    #[must_use]
    pub fn ok(elapsed: Duration) -> Self {
        Self {
            status: ProbeStatus::Ok,
            elapsed,
            error: None,
            chain_id: None,
        }
    }

    #[must_use]
    pub fn failed(elapsed: Duration, error: String) -> Self {
        Self {
            status: ProbeStatus::Error,
            elapsed,
            error: Some(error),
            chain_id: None,
        }
    }

    #[must_use]
    pub fn with_chain_id(self, chain_id: u64) -> Self {
        Self {
            chain_id: Some(chain_id),
            ..self
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == ProbeStatus::Ok
    }
}

/// Overall status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Status {
    /// Every probe passed.
    #[display("OK")]
    Ok,
    /// At least one probe failed.
    #[display("DEGRADED")]
    Degraded,
}

impl Status {
    #[must_use]
    pub fn from_checks(checks: &BTreeMap<Probe, ProbeResult>) -> Self {
        if checks.values().all(ProbeResult::is_ok) {
            Status::Ok
        } else {
            Status::Degraded
        }
    }
}

/// Everything known about the health of the service at a given time.
#[derive(Clone, Debug, PartialEq)]
pub struct HealthReport {
    pub status: Status,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    pub version: String,
    pub uptime: Duration,
    pub memory: MemorySnapshot,
    pub checks: BTreeMap<Probe, ProbeResult>,
    /// Wall time spent building the whole report.
    pub total_elapsed: Duration,
}

/// The process is able to serve requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Readiness {
    pub timestamp: DateTime<Utc>,
    pub pid: u32,
}

/// The process is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Liveness {
    pub timestamp: DateTime<Utc>,
    pub uptime: Duration,
}

#[must_use]
pub fn readiness() -> Readiness {
    Readiness {
        timestamp: clock::now(),
        pid: std::process::id(),
    }
}

#[must_use]
pub fn liveness() -> Liveness {
    Liveness {
        timestamp: clock::now(),
        uptime: clock::uptime(),
    }
}
