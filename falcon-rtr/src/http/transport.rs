//! HTTP transport abstraction

use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use reqwest::Client;
use tracing::debug;
use url::{form_urlencoded, Url};

use crate::errors::RtrError;

/// Request body. A request carries a JSON body or a form body, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Content type matching the body kind
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            RequestBody::Empty => None,
            RequestBody::Json(_) => Some("application/json"),
            RequestBody::Form(_) => Some("application/x-www-form-urlencoded"),
        }
    }

    /// Encode the body into bytes
    pub fn encode(&self) -> Result<Option<Vec<u8>>, RtrError> {
        match self {
            RequestBody::Empty => Ok(None),
            RequestBody::Json(value) => Ok(Some(serde_json::to_vec(value)?)),
            RequestBody::Form(pairs) => Ok(Some(
                form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs)
                    .finish()
                    .into_bytes(),
            )),
        }
    }
}

/// A fully built request, ready to send
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

/// Raw response: status plus the body as text
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Transport trait for testability
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and return the raw response
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RtrError>;
}

/// Transport backed by reqwest
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a fixed per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, RtrError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, RtrError> {
        debug!("{} {}", request.method, request.url);

        let body = request.body.encode()?;
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
