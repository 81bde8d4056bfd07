//! Testing helpers for the escrow health service.
pub mod configuration;
pub mod random;
