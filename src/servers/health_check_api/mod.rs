//! Health Check HTTP API.
//!
//! It is intended to be used by the container infrastructure and by the
//! operators to know whether the escrow backend can reach its dependencies.
//!
//! Endpoints, relative to the configured base path (default `/api/health`):
//!
//! Endpoint | Probes | Status code
//! ---|---|---
//! `GET /`      | database, auth, blockchain | `200` when `OK`, `503` otherwise
//! `GET /ready` | none                       | always `200`
//! `GET /live`  | none                       | always `200`
//!
//! Sample full report:
//!
//! ```json
//! {
//!   "status": "DEGRADED",
//!   "timestamp": "2024-05-01T10:15:30.123Z",
//!   "environment": "production",
//!   "version": "0.1.0",
//!   "uptime": 3605.12,
//!   "memory": { "rss": 24182784, "virtualMemory": 1187409920, "systemTotal": 16624054272, "systemUsed": 7430488064 },
//!   "checks": {
//!     "auth": { "status": "OK", "responseTime": 0.21 },
//!     "blockchain": { "status": "OK", "responseTime": 85.3, "chainId": 137 },
//!     "database": { "status": "ERROR", "responseTime": 3001.7, "error": "connection refused" }
//!   },
//!   "totalResponseTime": 3002.4
//! }
//! ```
pub mod server;
pub mod v0;

pub const HEALTH_CHECK_API_LOG_TARGET: &str = "HEALTH CHECK API";
