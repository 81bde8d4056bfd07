//! Modules with generic logic used by several modules.
//!
//! - [`clock`]: Process start time, uptime and report timestamps.
//! - [`error`]: Helpers shared by the error types of every layer.
pub mod clock;
pub mod error;
