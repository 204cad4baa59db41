//! Rule resolution.
//!
//! # Responsibilities
//! - Apply one redirect/rewrite rule to a request URL
//! - Produce the resolved destination URL, or an explicit no-match
//!
//! # Design Decisions
//! - `Ok(None)` is the no-match sentinel; errors are reserved for broken
//!   configuration (bad pattern, bad destination URL)
//! - Matching consumes the request's path component only; the destination
//!   keeps its own origin and query string
//! - First-match-wins iteration belongs to the dispatcher, not here

use thiserror::Error;
use url::Url;

use super::formatter::PatternFormatter;
use super::matcher::PatternMatcher;
use super::pattern::PatternError;

/// Error raised while resolving a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Source or destination pattern failed to compile or format.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The rule's destination is not a valid absolute URL.
    #[error("invalid destination URL {url:?}: {source}")]
    Destination {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Apply one rule to a request URL.
///
/// Matches the request's origin-relative path against `source`; on a match,
/// substitutes the captured parameters into the path of `destination` and
/// returns the destination URL with the formatted path injected. Returns
/// `Ok(None)` when the source pattern does not match.
pub fn resolve_rule(
    source: &str,
    destination: &str,
    request_url: &Url,
) -> Result<Option<Url>, ResolveError> {
    let matcher = PatternMatcher::compile(source)?;
    let Some(params) = matcher.matches(request_url.path()) else {
        return Ok(None);
    };

    let mut target = Url::parse(destination).map_err(|source| ResolveError::Destination {
        url: destination.to_string(),
        source,
    })?;

    let formatter = PatternFormatter::compile(target.path())?;
    let path = formatter.format(&params)?;
    target.set_path(&path);

    Ok(Some(target))
}
