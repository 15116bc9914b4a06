//! Session state threaded between workflow steps

use crate::authn::token::BearerToken;
use crate::errors::RtrError;

/// Values produced by each step and consumed by the next.
///
/// Each field starts empty and is set once by the step that produces it.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Set by `authenticate`
    pub token: Option<BearerToken>,

    /// Set by `initialize_session`
    pub session_id: Option<String>,

    /// Set by `run_script`
    pub cloud_request_id: Option<String>,
}

impl SessionState {
    pub fn token(&self) -> Result<&BearerToken, RtrError> {
        self.token.as_ref().ok_or(RtrError::MissingState("access token"))
    }

    pub fn session_id(&self) -> Result<&str, RtrError> {
        self.session_id
            .as_deref()
            .ok_or(RtrError::MissingState("session id"))
    }

    pub fn cloud_request_id(&self) -> Result<&str, RtrError> {
        self.cloud_request_id
            .as_deref()
            .ok_or(RtrError::MissingState("cloud request id"))
    }
}
