//! Routing subsystem: patterns, matching, formatting, rule resolution.
//!
//! # Data Flow
//! ```text
//! Rule { source, destination } + request URL
//!     → pattern.rs (parse source into tokens)
//!     → matcher.rs (anchored match, extract params)
//!     → formatter.rs (substitute params into destination path)
//!     → resolver.rs (inject path into destination URL)
//!     → Return: resolved URL or explicit no-match
//! ```
//!
//! # Design Decisions
//! - Token lists instead of regex: matching is O(segments), nothing is
//!   compiled into a regex engine at runtime
//! - Pure functions over immutable input; safe to call concurrently
//! - First match wins; iteration order is the declaration order

pub mod formatter;
pub mod matcher;
pub mod path;
pub mod pattern;
pub mod resolver;

pub use formatter::PatternFormatter;
pub use matcher::{PatternMatcher, RouteParams};
pub use path::join_paths;
pub use pattern::{Pattern, PatternError};
pub use resolver::{resolve_rule, ResolveError};
