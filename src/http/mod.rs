//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route)
//!     → request.rs (add request ID)
//!     → [routing layer resolves redirect/rewrite/origin]
//!     → transport.rs (forwarding headers, outbound call)
//!     → Response to client
//! ```

pub mod request;
pub mod server;
pub mod transport;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
pub use transport::{HyperTransport, Transport, TransportError};
