//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every rule pattern and parse every destination URL
//! - Check destination parameters are captured by the source pattern
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;
use crate::routing::{Pattern, PatternError};

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The origin is not a valid absolute URL.
    #[error("origin {url:?} is not a valid URL: {source}")]
    Origin {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A rule's source pattern failed to compile.
    #[error("{rule} rule #{index}: invalid source pattern: {source}")]
    SourcePattern {
        rule: &'static str,
        index: usize,
        #[source]
        source: PatternError,
    },

    /// A rule's destination is not a valid absolute URL.
    #[error("{rule} rule #{index}: destination {url:?} is not a valid URL: {source}")]
    Destination {
        rule: &'static str,
        index: usize,
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A rule's destination path is not a valid pattern.
    #[error("{rule} rule #{index}: invalid destination pattern: {source}")]
    DestinationPattern {
        rule: &'static str,
        index: usize,
        #[source]
        source: PatternError,
    },

    /// The destination references a parameter the source never captures.
    #[error("{rule} rule #{index}: destination parameter {name:?} is not captured by the source pattern")]
    UnboundParam {
        rule: &'static str,
        index: usize,
        name: String,
    },
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(origin) = &config.origin {
        if let Err(source) = Url::parse(origin) {
            errors.push(ValidationError::Origin { url: origin.clone(), source });
        }
    }

    for (index, rule) in config.redirects.iter().enumerate() {
        validate_rule("redirect", index, &rule.source, &rule.destination, &mut errors);
    }
    for (index, rule) in config.rewrites.iter().enumerate() {
        validate_rule("rewrite", index, &rule.source, &rule.destination, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_rule(
    rule: &'static str,
    index: usize,
    source: &str,
    destination: &str,
    errors: &mut Vec<ValidationError>,
) {
    let source_params: Option<HashSet<String>> = match Pattern::parse(source) {
        Ok(pattern) => Some(pattern.param_names().map(str::to_string).collect()),
        Err(err) => {
            errors.push(ValidationError::SourcePattern { rule, index, source: err });
            None
        }
    };

    let destination_url = match Url::parse(destination) {
        Ok(url) => url,
        Err(err) => {
            errors.push(ValidationError::Destination {
                rule,
                index,
                url: destination.to_string(),
                source: err,
            });
            return;
        }
    };

    let destination_pattern = match Pattern::parse(destination_url.path()) {
        Ok(pattern) => pattern,
        Err(err) => {
            errors.push(ValidationError::DestinationPattern { rule, index, source: err });
            return;
        }
    };

    if let Some(source_params) = source_params {
        for name in destination_pattern.param_names() {
            if !source_params.contains(name) {
                errors.push(ValidationError::UnboundParam {
                    rule,
                    index,
                    name: name.to_string(),
                });
            }
        }
    }
}
