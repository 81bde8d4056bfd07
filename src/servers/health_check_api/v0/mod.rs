//! The un-versioned Health Check API.
pub mod handlers;
pub mod resources;
pub mod responses;
pub mod routes;
