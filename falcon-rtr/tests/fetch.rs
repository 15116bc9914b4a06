//! Sample fetch tests

mod common;

use common::MockTransport;
use falcon_rtr::errors::RtrError;
use falcon_rtr::http::fetch::fetch_raw;
use http::Method;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_fetch_returns_body_verbatim() {
    let transport = MockTransport::new().respond(Method::GET, "/products", 200, "[{\"id\":1}]\n");

    let body = assert_ok!(fetch_raw(&transport, "https://shop.test/products?limit=3").await);
    assert_eq!(body, "[{\"id\":1}]\n");

    let request = transport.find(Method::GET, "/products").unwrap();
    assert_eq!(request.url.query(), Some("limit=3"));
}

#[tokio::test]
async fn test_fetch_requires_200() {
    let transport = MockTransport::new().respond(Method::GET, "/products", 204, "");

    let err = assert_err!(fetch_raw(&transport, "https://shop.test/products").await);
    assert!(matches!(err, RtrError::StatusError { .. }));
}

#[tokio::test]
async fn test_fetch_invalid_url() {
    let transport = MockTransport::new();

    let err = assert_err!(fetch_raw(&transport, "::not a url").await);
    assert!(matches!(err, RtrError::InvalidUrl(_)));
    assert_eq!(transport.request_count(), 0);
}
