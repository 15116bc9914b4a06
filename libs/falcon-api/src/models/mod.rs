//! API models

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// Base command used for cloud script execution
pub const RUNSCRIPT_COMMAND: &str = "runscript";

/// Deserialize an optional field, mapping a value of the wrong shape to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// OAuth2 token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    #[serde(default, deserialize_with = "lenient")]
    pub expires_in: Option<i64>,
}

/// RTR session initialization request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitSessionRequest {
    pub device_id: String,
    pub queue_offline: bool,
}

impl InitSessionRequest {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            queue_offline: false,
        }
    }
}

/// RTR admin command request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCommandRequest {
    pub base_command: String,
    pub command_string: String,
    pub device_id: String,
    pub id: u32,
    pub persist: bool,
    pub session_id: String,
}

impl AdminCommandRequest {
    /// Build a `runscript` command that executes a script stored in the cloud
    pub fn runscript(
        script_name: &str,
        device_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            base_command: RUNSCRIPT_COMMAND.to_string(),
            command_string: format!("{} -CloudFile=\"{}\"", RUNSCRIPT_COMMAND, script_name),
            device_id: device_id.into(),
            id: 0,
            persist: true,
            session_id: session_id.into(),
        }
    }
}

/// Standard response envelope shared by the entity endpoints.
///
/// Only `resources` is read for success; `errors` is diagnostic and never
/// fails a decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ResourcesEnvelope<T> {
    #[serde(default)]
    pub resources: Option<Vec<T>>,

    #[serde(default, deserialize_with = "lenient")]
    pub errors: Option<Vec<ApiErrorEntry>>,
}

impl<T> ResourcesEnvelope<T> {
    /// Take the first resource, if any
    pub fn into_first(self) -> Option<T> {
        self.resources.and_then(|resources| resources.into_iter().next())
    }

    /// Error entries reported by the API
    pub fn errors(&self) -> &[ApiErrorEntry] {
        self.errors.as_deref().unwrap_or_default()
    }
}

/// Error entry reported inside an envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorEntry {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

/// Session resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResource {
    pub session_id: String,
}

/// Command submission resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResource {
    pub cloud_request_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runscript_command_string() {
        let request = AdminCommandRequest::runscript("foo.ps1", "dev-1", "sess-1");
        assert_eq!(request.base_command, "runscript");
        assert_eq!(request.command_string, r#"runscript -CloudFile="foo.ps1""#);
        assert_eq!(request.id, 0);
        assert!(request.persist);
    }

    #[test]
    fn test_init_session_never_queues_offline() {
        let body = serde_json::to_value(InitSessionRequest::new("dev-1")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "device_id": "dev-1", "queue_offline": false })
        );
    }

    #[test]
    fn test_envelope_missing_resources_is_empty() {
        let envelope: ResourcesEnvelope<SessionResource> = serde_json::from_str(
            r#"{"errors":[{"code":404,"message":"device not found"}]}"#,
        )
        .unwrap();
        assert!(envelope.resources.is_none());
        assert_eq!(envelope.errors()[0].message, "device not found");
        assert!(envelope.into_first().is_none());
    }

    #[test]
    fn test_envelope_tolerates_null_and_malformed_errors() {
        for body in [
            r#"{"resources":[{"session_id":"S1"}],"errors":null}"#,
            r#"{"resources":[{"session_id":"S1"}],"errors":"oops"}"#,
            r#"{"resources":[{"session_id":"S1","pwd":null}],"meta":7}"#,
        ] {
            let envelope: ResourcesEnvelope<SessionResource> =
                serde_json::from_str(body).unwrap();
            assert!(envelope.errors().is_empty());
            assert_eq!(envelope.into_first().unwrap().session_id, "S1");
        }
    }

    #[test]
    fn test_envelope_null_resources_has_no_first() {
        let envelope: ResourcesEnvelope<CommandResource> =
            serde_json::from_str(r#"{"resources":null,"errors":[]}"#).unwrap();
        assert!(envelope.into_first().is_none());
    }

    #[test]
    fn test_session_resource_requires_session_id() {
        let result: Result<ResourcesEnvelope<SessionResource>, _> =
            serde_json::from_str(r#"{"resources":[{"pwd":"C:\\"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_token_response_ignores_malformed_expiry() {
        for body in [
            r#"{"access_token":"abc","expires_in":"1799"}"#,
            r#"{"access_token":"abc","expires_in":null}"#,
            r#"{"access_token":"abc","expires_in":1.5,"token_type":5}"#,
        ] {
            let response: OAuthTokenResponse = serde_json::from_str(body).unwrap();
            assert_eq!(response.access_token, "abc");
            assert!(response.expires_in.is_none());
        }

        let response: OAuthTokenResponse =
            serde_json::from_str(r#"{"access_token":"abc","expires_in":1799}"#).unwrap();
        assert_eq!(response.expires_in, Some(1799));
    }

    #[test]
    fn test_token_response_rejects_non_string_token() {
        let result: Result<OAuthTokenResponse, _> =
            serde_json::from_str(r#"{"access_token":42}"#);
        assert!(result.is_err());
    }
}
