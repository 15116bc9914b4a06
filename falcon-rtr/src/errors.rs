//! Error types for the RTR client

use http::StatusCode;
use thiserror::Error;

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const API_ERROR: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

/// Main error type for the RTR client
#[derive(Error, Debug)]
pub enum RtrError {
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request failed with status {status}: {body}")]
    StatusError { status: StatusCode, body: String },

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0} not available")]
    MissingState(&'static str),
}

impl RtrError {
    /// Whether the error was raised before any network call was made
    pub fn is_config(&self) -> bool {
        matches!(self, RtrError::ConfigError(_) | RtrError::MissingState(_))
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        if self.is_config() {
            exit_codes::CONFIG_ERROR
        } else {
            exit_codes::API_ERROR
        }
    }
}
