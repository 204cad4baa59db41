//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the rewrite proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Base origin URL forwarded to when no rule matches.
    /// Absent means no fallback: unmatched requests get a 404.
    pub origin: Option<String>,

    /// Redirect rules, evaluated in declaration order before rewrites.
    pub redirects: Vec<RedirectRule>,

    /// Rewrite rules, evaluated in declaration order after redirects.
    pub rewrites: Vec<RewriteRule>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// A rule instructing the client to re-request a different URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedirectRule {
    /// Source path pattern (e.g., "/old/:id").
    pub source: String,

    /// Absolute destination URL, optionally with pattern parameters in its
    /// path (e.g., "https://example.com/new/:id").
    pub destination: String,

    /// Respond 308 Permanent Redirect instead of 307 Temporary Redirect.
    #[serde(default)]
    pub permanent: bool,
}

/// A rule forwarding the request to a different destination without
/// informing the client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RewriteRule {
    /// Source path pattern (e.g., "/blog/:path*").
    pub source: String,

    /// Absolute destination URL, optionally with pattern parameters in its
    /// path (e.g., "https://blog.example.com/:path*").
    pub destination: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
