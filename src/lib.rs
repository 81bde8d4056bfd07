//! **Escrow health** is the health, readiness and liveness service of the
//! escrow backend.
//!
//! > **Disclaimer**: This service does not expose any business endpoint. It
//! only tells whether the backend can reach its dependencies.
//!
//! # Table of contents
//!
//! - [Features](#features)
//! - [Services](#services)
//! - [Configuration](#configuration)
//! - [Usage](#usage)
//! - [Components](#components)
//!
//! # Features
//!
//! - Full health report probing the database, the auth service and the chain
//!   JSON-RPC endpoint concurrently.
//! - Readiness and liveness endpoints for container orchestrators.
//! - `SQLite3`, `MySQL` and Firestore persistence.
//! - Per-probe deadline: a slow or panicking dependency check never hides the
//!   result of the others.
//!
//! # Services
//!
//! The only service is the Health Check API. With the default configuration
//! it listens on `http://127.0.0.1:1313/api/health`:
//!
//! ```text
//! curl -s http://127.0.0.1:1313/api/health
//! curl -s http://127.0.0.1:1313/api/health/ready
//! curl -s http://127.0.0.1:1313/api/health/live
//! ```
//!
//! Refer to the [`servers::health_check_api`] module for the response format.
//!
//! # Configuration
//!
//! The configuration is loaded from the TOML file at
//! `./share/default/config/health.toml` and from env vars. For example:
//!
//! ```toml
//! [metadata]
//! environment = "production"
//!
//! [logging]
//! threshold = "info"
//! style = "json"
//!
//! [health_check_api]
//! bind_address = "0.0.0.0:1313"
//! base_path = "/api/health"
//! probe_timeout_secs = 5
//!
//! [database]
//! driver = "Firestore"
//!
//! [database.firestore]
//! project_id = "escrow-prod"
//!
//! [auth]
//! project_id = "escrow-prod"
//! api_key = "AIza..."
//!
//! [blockchain]
//! rpc_url = "https://polygon-rpc.com/"
//! chain_id = 137
//! request_timeout_secs = 5
//! ```
//!
//! Refer to the [`bootstrap::config`] module for the precedence of the
//! sources.
//!
//! # Usage
//!
//! ```text
//! cargo run
//! ```
//!
//! # Components
//!
//! - [`core`]: the probed dependencies and the health checker.
//! - [`servers`]: the Health Check API.
//! - [`bootstrap`]: configuration, logging and the wiring of the
//!   dependencies.
//! - [`shared`]: clock and error helpers.
pub mod app;
pub mod bootstrap;
pub mod core;
pub mod servers;
pub mod shared;

#[macro_use]
extern crate lazy_static;
