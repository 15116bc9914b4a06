//! Falcon RTR client library
//!
//! Authenticates against the Falcon API, opens a real-time response session
//! on a device, runs a cloud script and polls the command status.

pub mod app;
pub mod authn;
pub mod errors;
pub mod http;
pub mod logs;
pub mod rtr;
pub mod utils;
