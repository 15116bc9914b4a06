//! HTTP layer

pub mod client;
pub mod fetch;
pub mod transport;
