//! Path pattern parsing.
//!
//! # Responsibilities
//! - Parse a pattern string into a typed token list
//! - Validate parameter names (well-formed, unique per pattern)
//! - Track whether the pattern demands a trailing slash
//!
//! # Design Decisions
//! - Token list instead of a compiled regex: no dynamic regex construction
//!   at runtime, matching stays O(segments)
//! - Parse failures are typed errors, never panics

use thiserror::Error;

/// Error raised while parsing a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Pattern does not start with `/`.
    #[error("pattern {0:?} must start with '/'")]
    MissingLeadingSlash(String),

    /// Pattern contains `//` (an empty segment).
    #[error("pattern {0:?} contains an empty segment")]
    EmptySegment(String),

    /// Parameter segment has a malformed name.
    #[error("invalid parameter name in segment {0:?}")]
    InvalidParamName(String),

    /// The same parameter name appears twice in one pattern.
    #[error("duplicate parameter {0:?}")]
    DuplicateParam(String),

    /// A required parameter had no value supplied at formatting time.
    #[error("missing value for parameter {0:?}")]
    MissingParam(String),
}

/// How many path segments a parameter consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `:name` — exactly one non-empty segment.
    Required,
    /// `:name?` — zero or one segment.
    Optional,
    /// `:name*` — zero or more segments, captured joined by `/`.
    CatchAll,
}

/// One token of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternToken {
    /// A literal path segment, matched verbatim.
    Literal(String),
    /// A named parameter.
    Param { name: String, kind: ParamKind },
}

/// A parsed path pattern: ordered tokens plus a trailing-slash flag.
///
/// `/blog/:path*` parses to `[Literal("blog"), Param(path, CatchAll)]`;
/// `/docs/` parses to `[Literal("docs")]` with `trailing_slash = true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    tokens: Vec<PatternToken>,
    trailing_slash: bool,
}

impl Pattern {
    /// Parse a pattern string.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(pattern.to_string()))?;

        // "/" is the empty pattern: no tokens, no trailing slash.
        if rest.is_empty() {
            return Ok(Self { tokens: Vec::new(), trailing_slash: false });
        }

        let (body, trailing_slash) = match rest.strip_suffix('/') {
            Some(body) => (body, true),
            None => (rest, false),
        };

        let mut tokens = Vec::new();
        for segment in body.split('/') {
            if segment.is_empty() {
                return Err(PatternError::EmptySegment(pattern.to_string()));
            }
            match segment.strip_prefix(':') {
                Some(param) => {
                    let (name, kind) = if let Some(name) = param.strip_suffix('?') {
                        (name, ParamKind::Optional)
                    } else if let Some(name) = param.strip_suffix('*') {
                        (name, ParamKind::CatchAll)
                    } else {
                        (param, ParamKind::Required)
                    };
                    if name.is_empty()
                        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        return Err(PatternError::InvalidParamName(segment.to_string()));
                    }
                    if tokens.iter().any(|t| matches!(t, PatternToken::Param { name: n, .. } if n == name)) {
                        return Err(PatternError::DuplicateParam(name.to_string()));
                    }
                    tokens.push(PatternToken::Param { name: name.to_string(), kind });
                }
                None => tokens.push(PatternToken::Literal(segment.to_string())),
            }
        }

        Ok(Self { tokens, trailing_slash })
    }

    /// The parsed tokens, in pattern order.
    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    /// Whether the pattern ends in `/`.
    pub fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Names of all parameters, in order of appearance.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|t| match t {
            PatternToken::Param { name, .. } => Some(name.as_str()),
            PatternToken::Literal(_) => None,
        })
    }
}
