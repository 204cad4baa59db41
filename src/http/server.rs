//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all proxy handler
//! - Wire up middleware (tracing, request ID)
//! - Run the redirect → rewrite → origin → 404 state machine per request
//! - Collapse any dispatch error to a single 500 at the handler boundary
//!
//! # Design Decisions
//! - Rules are scanned in declaration order; the first match wins and no
//!   further rules are evaluated
//! - The handler owns no mutable state; concurrent requests share the
//!   immutable config through an Arc
//! - The network call is delegated to the Transport seam exactly once

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::http::request::RequestIdLayer;
use crate::http::transport::{prepare_upstream_request, HyperTransport, Transport};
use crate::routing::{join_paths, resolve_rule};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ProxyConfig>,
    transport: Arc<dyn Transport>,
}

/// HTTP server for the rewrite proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<ProxyConfig>,
}

impl HttpServer {
    /// Create a server with the production transport.
    pub fn new(config: ProxyConfig) -> Self {
        Self::with_transport(config, Arc::new(HyperTransport::new()))
    }

    /// Create a server forwarding through the given transport.
    pub fn with_transport(config: ProxyConfig, transport: Arc<dyn Transport>) -> Self {
        let config = Arc::new(config);
        let state = AppState { config: config.clone(), transport };
        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            redirects = self.config.redirects.len(),
            rewrites = self.config.rewrites.len(),
            origin = self.config.origin.as_deref().unwrap_or("none"),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler.
///
/// The single place where dispatch errors become a response: anything that
/// goes wrong while resolving or forwarding is logged and collapsed to a
/// generic 500.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match dispatch(&state, request).await {
        Ok(response) => response,
        Err(error) => {
            tracing::error!(method = %method, path = %path, %error, "Request dispatch failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Per-request state machine: redirects, then rewrites, then the origin
/// fallback, then 404.
async fn dispatch(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    let request_url = request_url(&request)?;

    for rule in &state.config.redirects {
        if let Some(target) = resolve_rule(&rule.source, &rule.destination, &request_url)? {
            let status = if rule.permanent {
                StatusCode::PERMANENT_REDIRECT
            } else {
                StatusCode::TEMPORARY_REDIRECT
            };
            tracing::debug!(
                source = %rule.source,
                target = %target,
                status = status.as_u16(),
                "Redirect rule matched"
            );
            return redirect_response(status, &target);
        }
    }

    for rule in &state.config.rewrites {
        if let Some(target) = resolve_rule(&rule.source, &rule.destination, &request_url)? {
            tracing::debug!(source = %rule.source, target = %target, "Rewrite rule matched");
            return forward(state.transport.as_ref(), request, &target).await;
        }
    }

    if let Some(origin) = &state.config.origin {
        let mut target = Url::parse(origin).map_err(|source| ProxyError::Origin {
            url: origin.clone(),
            source,
        })?;
        let path = join_paths(&[target.path(), request_url.path()]);
        target.set_path(&path);
        target.set_query(request_url.query());
        tracing::debug!(target = %target, "Forwarding to origin");
        return forward(state.transport.as_ref(), request, &target).await;
    }

    tracing::debug!(path = %request_url.path(), "No rule matched and no origin configured");
    Ok((StatusCode::NOT_FOUND, "Not Found").into_response())
}

/// Forward the request to `target` and return the upstream response
/// verbatim.
async fn forward(
    transport: &dyn Transport,
    request: Request<Body>,
    target: &Url,
) -> Result<Response, ProxyError> {
    let upstream = prepare_upstream_request(request, target)?;
    let response = transport.send(upstream).await?;
    Ok(response)
}

/// Reconstruct the full request URL from the inbound URI and Host header.
fn request_url(request: &Request<Body>) -> Result<Url, ProxyError> {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    Url::parse(&format!("https://{host}{path_and_query}"))
        .map_err(|err| ProxyError::Request(format!("unparseable request URL: {err}")))
}

fn redirect_response(status: StatusCode, target: &Url) -> Result<Response, ProxyError> {
    Response::builder()
        .status(status)
        .header(header::LOCATION, target.as_str())
        .body(Body::empty())
        .map_err(|err| ProxyError::Request(err.to_string()))
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to install Ctrl+C handler");
    }
    tracing::info!("Shutdown signal received");
}
