//! Endpoint URLs derived from the API base URL

use url::Url;

use crate::errors::RtrError;

pub const DEFAULT_BASE_URL: &str = "https://api.crowdstrike.com";

const TOKEN_PATH: &str = "/oauth2/token";
const SESSIONS_PATH: &str = "/real-time-response/entities/sessions/v1";
const ADMIN_COMMAND_PATH: &str = "/real-time-response/entities/admin-command/v1";

/// Resolved endpoint URLs
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub token: Url,
    pub sessions: Url,
    pub admin_command: Url,
}

impl Endpoints {
    /// Derive the endpoint URLs from a base URL
    pub fn new(base_url: &str) -> Result<Self, RtrError> {
        let base_url = base_url.trim_end_matches('/');
        let join = |path: &str| Url::parse(&format!("{}{}", base_url, path));

        Ok(Self {
            token: join(TOKEN_PATH)?,
            sessions: join(SESSIONS_PATH)?,
            admin_command: join(ADMIN_COMMAND_PATH)?,
        })
    }
}
