//! Real-time response session client

use chrono::Utc;
use falcon_api::models::{
    AdminCommandRequest, CommandResource, InitSessionRequest, OAuthTokenResponse,
    ResourcesEnvelope, SessionResource,
};
use tracing::{debug, info};

use crate::authn::credentials::Credentials;
use crate::authn::token::BearerToken;
use crate::errors::RtrError;
use crate::http::client::{ApiRequest, HttpClient};
use crate::http::transport::Transport;
use crate::rtr::endpoints::Endpoints;
use crate::rtr::state::SessionState;

/// Session timeout requested when opening a session, in seconds
pub const SESSION_TIMEOUT_SECS: u64 = 30;

/// Client configuration, fixed after construction
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub device_id: Option<String>,
    pub endpoints: Endpoints,
}

/// Client for the RTR workflow: authenticate, open a session, run a script,
/// poll the command status.
pub struct RtrClient<T: Transport> {
    http: HttpClient<T>,
    config: ClientConfig,
    state: SessionState,
}

impl<T: Transport> RtrClient<T> {
    /// Create a new client with empty session state
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            http: HttpClient::new(transport),
            config,
            state: SessionState::default(),
        }
    }

    /// Resume from previously obtained session state
    pub fn with_state(mut self, state: SessionState) -> Self {
        self.state = state;
        self
    }

    /// Get the current session state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Consume the client, returning the session state
    pub fn into_state(self) -> SessionState {
        self.state
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        self.http.transport()
    }

    fn device_id(&self) -> Result<&str, RtrError> {
        match self.config.device_id.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(id),
            _ => Err(RtrError::ConfigError(
                "DEVICE_ID is not set; a device id is required for real-time response".to_string(),
            )),
        }
    }

    /// Obtain an OAuth2 access token
    pub async fn authenticate(&mut self) -> Result<(), RtrError> {
        debug!("Authenticating client {}", self.config.credentials.client_id());

        let request = ApiRequest::post(&self.config.endpoints.token)
            .form(&self.config.credentials.form_fields());
        let response: OAuthTokenResponse = self.http.send(request, None).await?;
        require_non_empty(&response.access_token, "access_token")?;

        let token = BearerToken::from_response(response, Utc::now());
        match token.expires_at() {
            Some(expires_at) => info!("Authenticated, token expires at {}", expires_at),
            None => info!("Authenticated"),
        }
        self.state.token = Some(token);

        Ok(())
    }

    /// Open an RTR session against the configured device and return its id
    pub async fn initialize_session(&mut self) -> Result<String, RtrError> {
        let device_id = self.device_id()?;
        let token = self.state.token()?;

        let timeout = SESSION_TIMEOUT_SECS.to_string();
        let request = ApiRequest::post(&self.config.endpoints.sessions)
            .query("timeout", timeout.as_str())
            .query("timeout_duration", format!("{}s", SESSION_TIMEOUT_SECS))
            .json(&InitSessionRequest::new(device_id))?
            .authorized();

        let envelope: ResourcesEnvelope<SessionResource> =
            self.http.send(request, Some(token)).await?;
        let session_id = first_resource(envelope, "session_id")?.session_id;
        require_non_empty(&session_id, "resources[0].session_id")?;

        info!("RTR session {} opened for device {}", session_id, device_id);
        self.state.session_id = Some(session_id.clone());

        Ok(session_id)
    }

    /// Submit a `runscript` admin command for a cloud script and return the
    /// cloud request id
    pub async fn run_script(&mut self, script_name: &str) -> Result<String, RtrError> {
        let device_id = self.device_id()?;
        let session_id = self.state.session_id()?;
        let token = self.state.token()?;

        let command = AdminCommandRequest::runscript(script_name, device_id, session_id);
        debug!("Submitting command: {}", command.command_string);
        let request = ApiRequest::post(&self.config.endpoints.admin_command)
            .json(&command)?
            .authorized();

        let envelope: ResourcesEnvelope<CommandResource> =
            self.http.send(request, Some(token)).await?;
        let cloud_request_id = first_resource(envelope, "cloud_request_id")?.cloud_request_id;
        require_non_empty(&cloud_request_id, "resources[0].cloud_request_id")?;

        info!("Command submitted, cloud request id {}", cloud_request_id);
        self.state.cloud_request_id = Some(cloud_request_id.clone());

        Ok(cloud_request_id)
    }

    /// Get the status of the last submitted command
    pub async fn get_command_status(&self) -> Result<serde_json::Value, RtrError> {
        let cloud_request_id = self.state.cloud_request_id()?;
        self.get_command_status_for(cloud_request_id).await
    }

    /// Get the status of a command by its cloud request id
    pub async fn get_command_status_for(
        &self,
        cloud_request_id: &str,
    ) -> Result<serde_json::Value, RtrError> {
        let token = self.state.token()?;
        let request = ApiRequest::get(&self.config.endpoints.admin_command)
            .query("cloud_request_id", cloud_request_id)
            .query("sequence_id", "0")
            .authorized();

        self.http.send(request, Some(token)).await
    }
}

fn first_resource<R>(envelope: ResourcesEnvelope<R>, field: &str) -> Result<R, RtrError> {
    let errors = envelope
        .errors()
        .iter()
        .map(|e| match e.code {
            Some(code) => format!("{}: {}", code, e.message),
            None => e.message.clone(),
        })
        .collect::<Vec<_>>();

    envelope.into_first().ok_or_else(|| {
        if errors.is_empty() {
            RtrError::DecodeError(format!("response has no resources[0].{}", field))
        } else {
            RtrError::DecodeError(format!(
                "response has no resources[0].{} (errors: {})",
                field,
                errors.join("; ")
            ))
        }
    })
}

fn require_non_empty(value: &str, field: &str) -> Result<(), RtrError> {
    if value.is_empty() {
        return Err(RtrError::DecodeError(format!("response field {} is empty", field)));
    }
    Ok(())
}
