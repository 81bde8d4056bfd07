pub mod client;
pub mod contract;
pub mod environment;
