//! Shared test fixtures
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use falcon_rtr::authn::credentials::Credentials;
use falcon_rtr::errors::RtrError;
use falcon_rtr::http::transport::{HttpRequest, HttpResponse, Transport};
use falcon_rtr::rtr::client::{ClientConfig, RtrClient};
use falcon_rtr::rtr::endpoints::Endpoints;
use http::{Method, StatusCode};

pub const BASE_URL: &str = "https://falcon.test";
pub const TOKEN_PATH: &str = "/oauth2/token";
pub const SESSIONS_PATH: &str = "/real-time-response/entities/sessions/v1";
pub const ADMIN_COMMAND_PATH: &str = "/real-time-response/entities/admin-command/v1";

/// Transport that replays canned responses and records every request
#[derive(Default)]
pub struct MockTransport {
    routes: HashMap<(Method, String), HttpResponse>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with `status` and `body`
    pub fn respond(mut self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            (method, path.to_string()),
            HttpResponse {
                status: StatusCode::from_u16(status).unwrap(),
                body: body.to_string(),
            },
        );
        self
    }

    /// Routes for the full happy path
    pub fn happy_path() -> Self {
        Self::new()
            .respond(Method::POST, TOKEN_PATH, 201, r#"{"access_token":"T1"}"#)
            .respond(
                Method::POST,
                SESSIONS_PATH,
                201,
                r#"{"resources":[{"session_id":"S1"}]}"#,
            )
            .respond(
                Method::POST,
                ADMIN_COMMAND_PATH,
                201,
                r#"{"resources":[{"cloud_request_id":"R1"}]}"#,
            )
            .respond(Method::GET, ADMIN_COMMAND_PATH, 200, r#"{"status":"done"}"#)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The recorded request for `method path`, if one was sent
    pub fn find(&self, method: Method, path: &str) -> Option<HttpRequest> {
        self.requests()
            .into_iter()
            .find(|r| r.method == method && r.url.path() == path)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RtrError> {
        let key = (request.method.clone(), request.url.path().to_string());
        self.requests.lock().unwrap().push(request);

        Ok(self.routes.get(&key).cloned().unwrap_or(HttpResponse {
            status: StatusCode::NOT_FOUND,
            body: r#"{"errors":[{"code":404,"message":"no route"}]}"#.to_string(),
        }))
    }
}

pub fn config(device_id: Option<&str>) -> ClientConfig {
    ClientConfig {
        credentials: Credentials::new("client-1", "secret-1").unwrap(),
        device_id: device_id.map(str::to_string),
        endpoints: Endpoints::new(BASE_URL).unwrap(),
    }
}

pub fn client(transport: MockTransport) -> RtrClient<MockTransport> {
    RtrClient::new(config(Some("dev-1")), transport)
}
