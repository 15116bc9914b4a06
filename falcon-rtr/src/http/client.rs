//! HTTP client implementation

use http::{header, HeaderMap, HeaderValue, Method};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};
use url::Url;

use crate::authn::token::BearerToken;
use crate::errors::RtrError;
use crate::http::transport::{HttpRequest, RequestBody, Transport};

/// Builder for a single API request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    url: Url,
    query: Vec<(String, String)>,
    body: RequestBody,
    authorized: bool,
}

impl ApiRequest {
    fn new(method: Method, url: &Url) -> Self {
        Self {
            method,
            url: url.clone(),
            query: Vec::new(),
            body: RequestBody::Empty,
            authorized: false,
        }
    }

    /// Start a GET request
    pub fn get(url: &Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Start a POST request
    pub fn post(url: &Url) -> Self {
        Self::new(Method::POST, url)
    }

    /// Append a query parameter
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Set a JSON body, replacing any form body
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, RtrError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Set a form body, replacing any JSON body
    pub fn form(mut self, pairs: &[(&str, &str)]) -> Self {
        self.body = RequestBody::Form(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    /// Send the bearer token with this request
    pub fn authorized(mut self) -> Self {
        self.authorized = true;
        self
    }

    fn build(self, token: Option<&BearerToken>) -> Result<HttpRequest, RtrError> {
        let mut url = self.url;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(content_type) = self.body.content_type() {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        if self.authorized {
            if let Some(token) = token {
                let value = HeaderValue::from_str(&token.authorization_value())
                    .map_err(|e| RtrError::DecodeError(format!("Invalid bearer token: {}", e)))?;
                headers.insert(header::AUTHORIZATION, value);
            }
        }

        Ok(HttpRequest {
            method: self.method,
            url,
            headers,
            body: self.body,
        })
    }
}

/// HTTP client for the Falcon API.
///
/// Every call goes through [`HttpClient::send`], which owns header handling,
/// status checking and response decoding.
pub struct HttpClient<T: Transport> {
    transport: T,
}

impl<T: Transport> HttpClient<T> {
    /// Create a new HTTP client
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and decode a 2xx JSON response
    pub async fn send<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
        token: Option<&BearerToken>,
    ) -> Result<R, RtrError> {
        let request = request.build(token)?;
        let method = request.method.clone();
        let path = request.url.path().to_string();
        debug!("{} {}", method, path);

        let response = self.transport.execute(request).await?;

        if !response.status.is_success() {
            error!("HTTP {} {} failed: {} - {}", method, path, response.status, response.body);
            return Err(RtrError::StatusError {
                status: response.status,
                body: response.body,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| {
            error!("HTTP {} {} returned an undecodable body: {}", method, path, e);
            RtrError::DecodeError(format!("{} {}: {}", method, path, e))
        })
    }
}
