//! Plain GET of an arbitrary URL, returning the body untouched

use http::{HeaderMap, Method, StatusCode};
use tracing::{debug, error};
use url::Url;

use crate::errors::RtrError;
use crate::http::transport::{HttpRequest, RequestBody, Transport};

/// Fetch `url` and return the response body. Anything but `200 OK` is an error.
pub async fn fetch_raw<T: Transport>(transport: &T, url: &str) -> Result<String, RtrError> {
    let url = Url::parse(url)?;
    debug!("GET {}", url);

    let request = HttpRequest {
        method: Method::GET,
        url,
        headers: HeaderMap::new(),
        body: RequestBody::Empty,
    };
    let response = transport.execute(request).await?;

    if response.status != StatusCode::OK {
        error!("Fetch failed: {}", response.status);
        return Err(RtrError::StatusError {
            status: response.status,
            body: response.body,
        });
    }

    Ok(response.body)
}
