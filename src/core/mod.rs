//! The core of the health service.
//!
//! It knows the external dependencies of the escrow backend and how to probe
//! them:
//!
//! - [`databases`]: the document store where the sentinel record lives.
//! - [`auth`]: the authentication service.
//! - [`blockchain`]: the JSON-RPC endpoint of the chain.
//!
//! The [`health`] module aggregates the probes into a health report. It does
//! not know anything about HTTP: the [`servers`](crate::servers) module
//! exposes the reports.
pub mod auth;
pub mod blockchain;
pub mod databases;
pub mod health;
