//! Application configuration options

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};

use crate::authn::credentials::Credentials;
use crate::errors::RtrError;
use crate::logs::{LogLevel, LogOptions};
use crate::rtr::client::ClientConfig;
use crate::rtr::endpoints::{Endpoints, DEFAULT_BASE_URL};

pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";
pub const DEVICE_ID_VAR: &str = "DEVICE_ID";
pub const API_URL_VAR: &str = "API_URL";
pub const BASE_URL_VAR: &str = "FALCON_BASE_URL";
pub const SCRIPT_VAR: &str = "RTR_SCRIPT";
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// API client credentials
    pub credentials: Credentials,

    /// Target device
    pub device_id: Option<String>,

    /// API base URL
    pub base_url: String,

    /// Cloud script to run
    pub script_name: String,

    /// Workflow timing
    pub workflow: WorkflowOptions,
}

impl AppOptions {
    /// Read options from command line arguments and the environment.
    ///
    /// Command line arguments take precedence. `lookup` resolves environment
    /// variables.
    pub fn from_lookup<F>(lookup: F, cli_args: &HashMap<String, String>) -> Result<Self, RtrError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = require(&lookup, CLIENT_ID_VAR)?;
        let client_secret = require(&lookup, CLIENT_SECRET_VAR)?;
        let credentials = Credentials::new(client_id, client_secret)?;

        let device_id = lookup(DEVICE_ID_VAR).filter(|id| !id.trim().is_empty());
        if device_id.is_none() {
            warn!("{} is not set; session initialization will fail", DEVICE_ID_VAR);
        }

        let base_url = lookup(BASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let script_name = cli_args
            .get("script")
            .cloned()
            .or_else(|| lookup(SCRIPT_VAR))
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                RtrError::ConfigError(format!(
                    "Missing script name. Provide via --script=<name> or {} environment variable",
                    SCRIPT_VAR
                ))
            })?;

        debug!("Using API base URL {}", base_url);

        Ok(Self {
            credentials,
            device_id,
            base_url,
            script_name,
            workflow: WorkflowOptions::default(),
        })
    }

    /// Build the RTR client configuration
    pub fn client_config(&self) -> Result<ClientConfig, RtrError> {
        Ok(ClientConfig {
            credentials: self.credentials.clone(),
            device_id: self.device_id.clone(),
            endpoints: Endpoints::new(&self.base_url)?,
        })
    }
}

/// Workflow timing options
#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    /// Per-request timeout
    pub request_timeout: Duration,

    /// Pause between submitting the command and polling its status
    pub status_delay: Duration,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            status_delay: Duration::from_secs(5),
        }
    }
}

/// Resolve logging options from command line arguments and the environment
pub fn log_options<F>(lookup: F, cli_args: &HashMap<String, String>) -> LogOptions
where
    F: Fn(&str) -> Option<String>,
{
    let log_level = cli_args
        .get("log-level")
        .cloned()
        .or_else(|| lookup(LOG_LEVEL_VAR))
        .and_then(|level| level.parse::<LogLevel>().ok())
        .unwrap_or_default();

    LogOptions {
        log_level,
        json_format: cli_args.contains_key("json-logs"),
    }
}

/// Resolve the URL used by `--fetch`
pub fn api_url<F>(lookup: F) -> Result<String, RtrError>
where
    F: Fn(&str) -> Option<String>,
{
    require(&lookup, API_URL_VAR)
}

fn require<F>(lookup: &F, name: &str) -> Result<String, RtrError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| RtrError::ConfigError(format!("{} environment variable not set", name)))
}
