//! API client credentials

use secrecy::{ExposeSecret, SecretString};

use crate::errors::RtrError;

/// OAuth2 client credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: SecretString,
}

impl Credentials {
    /// Create credentials. Both values must be non-empty.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, RtrError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if client_id.trim().is_empty() {
            return Err(RtrError::ConfigError("CLIENT_ID must not be empty".to_string()));
        }
        if client_secret.trim().is_empty() {
            return Err(RtrError::ConfigError("CLIENT_SECRET must not be empty".to_string()));
        }

        Ok(Self {
            client_id,
            client_secret: SecretString::from(client_secret),
        })
    }

    /// Get the client ID
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Form fields for the token endpoint
    pub(crate) fn form_fields(&self) -> [(&str, &str); 2] {
        [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
        ]
    }
}
