//! Outbound transport seam.
//!
//! # Responsibilities
//! - Define the transport contract the dispatcher forwards through
//! - Provide the production implementation over the hyper client
//! - Retarget the request URI and inject the forwarding headers
//!
//! # Design Decisions
//! - The dispatcher calls `send` exactly once per resolved request and
//!   returns the upstream response verbatim; pooling, timeouts and
//!   cancellation live behind this trait, not in the dispatcher
//! - Tests substitute the trait with in-process mocks

use axum::body::Body;
use axum::http::uri::Uri;
use axum::http::{header, HeaderValue, Request, Response};
use futures_util::future::BoxFuture;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use std::str::FromStr;
use thiserror::Error;

use crate::error::ProxyError;

/// Inbound header carrying the client IP, set by the fronting edge.
pub const CLIENT_IP_HEADER: &str = "cf-connecting-ip";

/// Error from the outbound network call.
#[derive(Debug, Error)]
#[error("upstream request failed: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Wrap a failure description.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<hyper_util::client::legacy::Error> for TransportError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// The outbound HTTP call the dispatcher delegates to.
pub trait Transport: Send + Sync {
    /// Send one request and return the upstream response.
    fn send(&self, request: Request<Body>) -> BoxFuture<'static, Result<Response<Body>, TransportError>>;
}

/// Production transport over the hyper legacy client.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Body>,
}

impl HyperTransport {
    /// Build a transport with a fresh connection pool.
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    fn send(&self, request: Request<Body>) -> BoxFuture<'static, Result<Response<Body>, TransportError>> {
        let future = self.client.request(request);
        Box::pin(async move {
            let response: Response<hyper::body::Incoming> = future.await?;
            let (parts, body) = response.into_parts();
            Ok(Response::from_parts(parts, Body::new(body)))
        })
    }
}

/// Rebuild an inbound request for forwarding to `target`.
///
/// Retargets the URI and `Host` header at the destination and sets the
/// three forwarding headers: `x-forwarded-for` from the edge-supplied
/// client IP (empty if absent), `x-forwarded-host` from the inbound `Host`
/// (empty if absent), and `x-forwarded-proto`, always `https`.
pub fn prepare_upstream_request(
    request: Request<Body>,
    target: &url::Url,
) -> Result<Request<Body>, ProxyError> {
    let (mut parts, body) = request.into_parts();

    let empty = HeaderValue::from_static("");
    let client_ip = parts
        .headers
        .get(CLIENT_IP_HEADER)
        .cloned()
        .unwrap_or_else(|| empty.clone());
    let inbound_host = parts
        .headers
        .get(header::HOST)
        .cloned()
        .unwrap_or(empty);

    parts.headers.insert("x-forwarded-for", client_ip);
    parts.headers.insert("x-forwarded-host", inbound_host);
    parts
        .headers
        .insert("x-forwarded-proto", HeaderValue::from_static("https"));

    let authority = target
        .authority()
        .parse::<HeaderValue>()
        .map_err(|_| ProxyError::Request(format!("invalid target authority {:?}", target.authority())))?;
    parts.headers.insert(header::HOST, authority);

    parts.uri = Uri::from_str(target.as_str())
        .map_err(|err| ProxyError::Request(format!("invalid target URI {:?}: {err}", target.as_str())))?;

    Ok(Request::from_parts(parts, body))
}
