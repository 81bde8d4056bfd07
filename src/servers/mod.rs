//! Servers. Services that can be started and stopped.
pub mod health_check_api;
pub mod logging;
pub mod signals;
