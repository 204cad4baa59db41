//! Pattern matching against request paths.
//!
//! # Responsibilities
//! - Test a concrete path against a compiled pattern
//! - Extract named parameters in pattern order
//! - Report no-match as `None`, never as an error
//!
//! # Design Decisions
//! - Anchored on both ends: no prefix or partial matches
//! - A trailing slash in the pattern requires one in the input; an input
//!   may carry at most one trailing slash a slash-free pattern omits
//! - Greedy matching: optional and catch-all parameters consume as many
//!   segments as the remaining tokens allow

use super::pattern::{ParamKind, Pattern, PatternError, PatternToken};

/// Parameters captured by a successful match, in order of appearance.
///
/// Absent optional parameters are omitted, not stored as empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    entries: Vec<(String, String)>,
}

impl RouteParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a captured parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of captured parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no parameters were captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for RouteParams {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (n, v) in iter {
            params.insert(n, v);
        }
        params
    }
}

/// A compiled matcher for one path pattern.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Pattern,
}

impl PatternMatcher {
    /// Compile a pattern string into a matcher.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self { pattern: Pattern::parse(pattern)? })
    }

    /// Test `path` against the pattern.
    ///
    /// Returns the captured parameters on a full match, `None` otherwise.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let rest = path.strip_prefix('/')?;

        let (body, path_trailing) = if rest.is_empty() {
            (rest, false)
        } else {
            match rest.strip_suffix('/') {
                Some(body) => (body, true),
                None => (rest, false),
            }
        };

        if self.pattern.trailing_slash() && !path_trailing {
            return None;
        }

        let segments: Vec<&str> = if body.is_empty() {
            Vec::new()
        } else {
            body.split('/').collect()
        };

        let mut params = RouteParams::new();
        if match_tokens(self.pattern.tokens(), &segments, &mut params) {
            Some(params)
        } else {
            None
        }
    }
}

/// Recursive anchored match of `tokens` against `segments`.
///
/// On success `params` holds the captures in pattern order; on failure its
/// contents are unspecified and the caller discards them.
fn match_tokens(tokens: &[PatternToken], segments: &[&str], params: &mut RouteParams) -> bool {
    let Some((token, rest)) = tokens.split_first() else {
        return segments.is_empty();
    };

    match token {
        PatternToken::Literal(literal) => segments
            .split_first()
            .is_some_and(|(seg, tail)| *seg == literal.as_str() && match_tokens(rest, tail, params)),

        PatternToken::Param { name, kind: ParamKind::Required } => {
            segments.split_first().is_some_and(|(seg, tail)| {
                if seg.is_empty() {
                    return false;
                }
                let checkpoint = params.entries.len();
                params.insert(name.clone(), *seg);
                if match_tokens(rest, tail, params) {
                    true
                } else {
                    params.entries.truncate(checkpoint);
                    false
                }
            })
        }

        PatternToken::Param { name, kind: ParamKind::Optional } => {
            // Greedy: consume one segment first, fall back to skipping.
            if let Some((seg, tail)) = segments.split_first() {
                if !seg.is_empty() {
                    let checkpoint = params.entries.len();
                    params.insert(name.clone(), *seg);
                    if match_tokens(rest, tail, params) {
                        return true;
                    }
                    params.entries.truncate(checkpoint);
                }
            }
            match_tokens(rest, segments, params)
        }

        PatternToken::Param { name, kind: ParamKind::CatchAll } => {
            // Greedy: longest capture first; zero segments omits the param.
            for take in (0..=segments.len()).rev() {
                let checkpoint = params.entries.len();
                if take > 0 {
                    params.insert(name.clone(), segments[..take].join("/"));
                }
                if match_tokens(rest, &segments[take..], params) {
                    return true;
                }
                params.entries.truncate(checkpoint);
            }
            false
        }
    }
}
