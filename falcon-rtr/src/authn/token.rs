//! OAuth2 bearer token

use chrono::{DateTime, TimeDelta, Utc};
use falcon_api::models::OAuthTokenResponse;
use secrecy::{ExposeSecret, SecretString};

/// A bearer token obtained from the token endpoint
#[derive(Debug, Clone)]
pub struct BearerToken {
    /// Raw token string
    raw: SecretString,

    /// Expiration time reported by the token endpoint, if any
    expires_at: Option<DateTime<Utc>>,
}

impl BearerToken {
    /// Wrap a raw token string
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: SecretString::from(raw.into()),
            expires_at: None,
        }
    }

    /// Build a token from the token endpoint response.
    ///
    /// `issued_at` anchors the relative `expires_in` value. An `expires_in`
    /// that does not fit a timestamp leaves the expiry unknown.
    pub fn from_response(response: OAuthTokenResponse, issued_at: DateTime<Utc>) -> Self {
        let expires_at = response
            .expires_in
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| issued_at.checked_add_signed(delta));

        Self {
            raw: SecretString::from(response.access_token),
            expires_at,
        }
    }

    /// Value for the `authorization` header
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.raw.expose_secret())
    }

    /// Get expiration time
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}
