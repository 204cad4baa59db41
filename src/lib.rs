//! Rewrite proxy library.
//!
//! Resolves incoming requests against ordered redirect and rewrite rules
//! built from declarative path patterns (`/blog/:path*`), falling back to a
//! configured origin, and forwards through a pluggable transport.

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
