//! Top-level error union for request dispatch.
//!
//! # Design Decisions
//! - One error type flows through resolution and dispatch; it is collapsed
//!   to a 500 response exactly once, at the handler boundary
//! - No-match is not an error anywhere in the chain

use thiserror::Error;

use crate::http::transport::TransportError;
use crate::routing::ResolveError;

/// Any failure raised while resolving or dispatching one request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// A rule could not be resolved (broken pattern or destination URL).
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The outbound network call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The configured origin is not a valid URL.
    #[error("invalid origin {url:?}: {source}")]
    Origin {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The inbound request could not be converted for forwarding.
    #[error("invalid request: {0}")]
    Request(String),
}
