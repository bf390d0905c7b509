//! Anchor resolution for first-time region insertion.
//!
//! The anchor is the first line whose trimmed content contains the anchor
//! directive name. A single-line directive anchors the next line. When the
//! directive opens a brace block, the scan counts every `{` and `}` from the
//! directive line on and anchors the line after depth first returns to zero,
//! so the region lands after the directive's own block rather than inside it.
//!
//! Braces inside comments or quoted arguments are counted like any other.

/// Line index at which a new managed region should be inserted.
///
/// Returns `None` when the directive is absent or its block never closes.
pub fn resolve_anchor<S: AsRef<str>>(lines: &[S], directive: &str) -> Option<usize> {
    let start = lines
        .iter()
        .position(|line| line.as_ref().trim().contains(directive))?;

    if !lines[start].as_ref().contains('{') {
        tracing::debug!(line = start, "Anchor is a single-line directive");
        return Some(start + 1);
    }

    let mut depth: i64 = 0;
    for (index, line) in lines.iter().enumerate().skip(start) {
        depth += brace_delta(line.as_ref());
        if depth == 0 {
            tracing::debug!(line = start, closes = index, "Anchor block resolved");
            return Some(index + 1);
        }
    }

    tracing::debug!(line = start, depth, "Anchor block never closes");
    None
}

/// Net brace depth change contributed by one line.
fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}
