//! Falcon real-time response API models

pub mod models;
