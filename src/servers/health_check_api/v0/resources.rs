//! API resources: the JSON bodies returned by the endpoints.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::health::memory::MemorySnapshot;
use crate::core::health::{self, HealthReport, Liveness, ProbeResult, ProbeStatus, Readiness};
use crate::shared::clock;

/// Overall status. `ERROR` is only used when the report could not be built.
#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Degraded,
    Error,
}

impl From<health::Status> for Status {
    fn from(status: health::Status) -> Self {
        match status {
            health::Status::Ok => Status::Ok,
            health::Status::Degraded => Status::Degraded,
        }
    }
}

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Ok,
    Error,
}

/// The result of one probe.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub status: CheckStatus,
    /// Milliseconds.
    pub response_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

impl From<ProbeResult> for CheckReport {
    fn from(result: ProbeResult) -> Self {
        Self {
            status: match result.status {
                ProbeStatus::Ok => CheckStatus::Ok,
                ProbeStatus::Error => CheckStatus::Error,
            },
            response_time: clock::as_millis_f64(result.elapsed),
            error: result.error,
            chain_id: result.chain_id,
        }
    }
}

/// Memory figures in bytes.
#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub rss: u64,
    pub virtual_memory: u64,
    pub system_total: u64,
    pub system_used: u64,
}

impl From<MemorySnapshot> for Memory {
    fn from(snapshot: MemorySnapshot) -> Self {
        Self {
            rss: snapshot.rss,
            virtual_memory: snapshot.virtual_memory,
            system_total: snapshot.system_total,
            system_used: snapshot.system_used,
        }
    }
}

/// The full health report.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub status: Status,
    pub timestamp: String,
    pub environment: String,
    pub version: String,
    /// Seconds.
    pub uptime: f64,
    pub memory: Memory,
    /// Keyed by probe name: `auth`, `blockchain` and `database`.
    pub checks: BTreeMap<String, CheckReport>,
    /// Milliseconds.
    pub total_response_time: f64,
}

impl From<HealthReport> for Report {
    fn from(report: HealthReport) -> Self {
        Self {
            status: report.status.into(),
            timestamp: clock::to_iso8601(&report.timestamp),
            environment: report.environment,
            version: report.version,
            uptime: report.uptime.as_secs_f64(),
            memory: report.memory.into(),
            checks: report
                .checks
                .into_iter()
                .map(|(probe, result)| (probe.to_string(), result.into()))
                .collect(),
            total_response_time: clock::as_millis_f64(report.total_elapsed),
        }
    }
}

/// The body returned when the report itself could not be built.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorReport {
    pub status: Status,
    pub error: String,
    pub timestamp: String,
}

impl ErrorReport {
    #[must_use]
    pub fn new(error: String) -> Self {
        Self {
            status: Status::Error,
            error,
            timestamp: clock::to_iso8601(&clock::now()),
        }
    }
}

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReadinessStatus {
    Ready,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ReadinessReport {
    pub status: ReadinessStatus,
    pub timestamp: String,
    pub pid: u32,
}

impl From<Readiness> for ReadinessReport {
    fn from(readiness: Readiness) -> Self {
        Self {
            status: ReadinessStatus::Ready,
            timestamp: clock::to_iso8601(&readiness.timestamp),
            pid: readiness.pid,
        }
    }
}

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LivenessStatus {
    Alive,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct LivenessReport {
    pub status: LivenessStatus,
    pub timestamp: String,
    /// Seconds.
    pub uptime: f64,
}

impl From<Liveness> for LivenessReport {
    fn from(liveness: Liveness) -> Self {
        Self {
            status: LivenessStatus::Alive,
            timestamp: clock::to_iso8601(&liveness.timestamp),
            uptime: liveness.uptime.as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::{ErrorReport, LivenessReport, ReadinessReport, Report};
    use crate::core::health::memory::MemorySnapshot;
    use crate::core::health::{HealthReport, Liveness, Probe, ProbeResult, Readiness, Status};

    fn sample_report() -> HealthReport {
        HealthReport {
            status: Status::Degraded,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 30).unwrap(),
            environment: "production".to_owned(),
            version: "0.1.0".to_owned(),
            uptime: Duration::from_millis(3_605_500),
            memory: MemorySnapshot {
                rss: 1024,
                virtual_memory: 4096,
                system_total: 8192,
                system_used: 2048,
            },
            checks: BTreeMap::from([
                (Probe::Auth, ProbeResult::ok(Duration::from_micros(250))),
                (
                    Probe::Blockchain,
                    ProbeResult::ok(Duration::from_millis(85)).with_chain_id(137),
                ),
                (
                    Probe::Database,
                    ProbeResult::failed(Duration::from_millis(3001), "connection refused".to_owned()),
                ),
            ]),
            total_elapsed: Duration::from_millis(3002),
        }
    }

    #[test]
    fn the_full_report_should_be_serialized_with_camel_case_keys() {
        let json = serde_json::to_value(Report::from(sample_report())).unwrap();

        assert_eq!(
            json,
            json!({
                "status": "DEGRADED",
                "timestamp": "2024-05-01T10:15:30.000Z",
                "environment": "production",
                "version": "0.1.0",
                "uptime": 3605.5,
                "memory": { "rss": 1024, "virtualMemory": 4096, "systemTotal": 8192, "systemUsed": 2048 },
                "checks": {
                    "auth": { "status": "OK", "responseTime": 0.25 },
                    "blockchain": { "status": "OK", "responseTime": 85.0, "chainId": 137 },
                    "database": { "status": "ERROR", "responseTime": 3001.0, "error": "connection refused" }
                },
                "totalResponseTime": 3002.0
            })
        );
    }

    #[test]
    fn the_error_report_should_only_carry_the_status_the_error_and_the_timestamp() {
        let json = serde_json::to_value(ErrorReport::new("process not found".to_owned())).unwrap();

        assert_eq!(json["status"], "ERROR");
        assert_eq!(json["error"], "process not found");
        assert!(json["timestamp"].is_string());
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn readiness_and_liveness_should_be_serialized_with_their_fixed_status() {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 30).unwrap();

        assert_eq!(
            serde_json::to_value(ReadinessReport::from(Readiness { timestamp, pid: 42 })).unwrap(),
            json!({ "status": "READY", "timestamp": "2024-05-01T10:15:30.000Z", "pid": 42 })
        );

        assert_eq!(
            serde_json::to_value(LivenessReport::from(Liveness {
                timestamp,
                uptime: Duration::from_millis(1500)
            }))
            .unwrap(),
            json!({ "status": "ALIVE", "timestamp": "2024-05-01T10:15:30.000Z", "uptime": 1.5 })
        );
    }
}
