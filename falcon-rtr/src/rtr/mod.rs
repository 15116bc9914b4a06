//! Real-time response workflow client

pub mod client;
pub mod endpoints;
pub mod state;
