//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through tracing; every dispatch decision logs the
//!   rule and target with field syntax
//! - Request IDs (http::request) tie log lines to one request

pub mod logging;

pub use logging::init_logging;
