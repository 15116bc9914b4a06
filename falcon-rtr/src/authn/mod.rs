//! Authentication

pub mod credentials;
pub mod token;
