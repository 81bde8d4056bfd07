pub mod fake_rpc;
pub mod logging;
