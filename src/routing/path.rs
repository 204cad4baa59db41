//! Path segment joining.
//!
//! # Responsibilities
//! - Concatenate path segments with `/` separators
//! - Collapse runs of consecutive slashes into one
//!
//! # Design Decisions
//! - Leading/trailing slashes of the overall result are preserved
//! - Empty segments contribute nothing beyond a (collapsed) separator
//! - Pure function, no allocation beyond the output string

/// Join path segments with `/`, collapsing duplicate slashes.
///
/// `join_paths(&["path1//", "//path2"])` yields `"path1/path2"`; joining
/// two bare slashes yields a single `"/"`.
pub fn join_paths(segments: &[&str]) -> String {
    let mut joined = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            joined.push('/');
        }
        joined.push_str(segment);
    }

    let mut out = String::with_capacity(joined.len());
    let mut prev_slash = false;
    for ch in joined.chars() {
        if ch == '/' {
            if !prev_slash {
                out.push(ch);
            }
            prev_slash = true;
        } else {
            out.push(ch);
            prev_slash = false;
        }
    }
    out
}
