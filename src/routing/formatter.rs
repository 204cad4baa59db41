//! Path construction from destination patterns.
//!
//! # Responsibilities
//! - Substitute captured parameters back into a destination pattern
//! - Omit absent optional/catch-all placeholders together with their slash
//!
//! # Design Decisions
//! - Permissive: supplied values are not validated for URL safety or
//!   emptiness; malformed output is the caller's contract to avoid
//! - A required parameter with no value is an error, not a silent blank

use super::matcher::RouteParams;
use super::pattern::{ParamKind, Pattern, PatternError, PatternToken};

/// A compiled formatter for one destination pattern.
#[derive(Debug, Clone)]
pub struct PatternFormatter {
    pattern: Pattern,
}

impl PatternFormatter {
    /// Compile a pattern string into a formatter.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self { pattern: Pattern::parse(pattern)? })
    }

    /// Substitute `params` into the pattern, producing a concrete path.
    pub fn format(&self, params: &RouteParams) -> Result<String, PatternError> {
        let mut out = String::new();
        for token in self.pattern.tokens() {
            match token {
                PatternToken::Literal(literal) => {
                    out.push('/');
                    out.push_str(literal);
                }
                PatternToken::Param { name, kind: ParamKind::Required } => {
                    let value = params
                        .get(name)
                        .ok_or_else(|| PatternError::MissingParam(name.clone()))?;
                    out.push('/');
                    out.push_str(value);
                }
                PatternToken::Param { name, kind: ParamKind::Optional }
                | PatternToken::Param { name, kind: ParamKind::CatchAll } => {
                    if let Some(value) = params.get(name) {
                        if !value.is_empty() {
                            out.push('/');
                            out.push_str(value);
                        }
                    }
                }
            }
        }

        if out.is_empty() {
            out.push('/');
        }
        if self.pattern.trailing_slash() && !out.ends_with('/') {
            out.push('/');
        }
        Ok(out)
    }
}
