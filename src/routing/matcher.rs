//! Path-template matching for match-path patterns.
//!
//! # Responsibilities
//! - Compare a request path against a client-route pattern
//! - Support named parameter segments (`:name`) and a trailing splat (`*`)
//!
//! # Design Decisions
//! - Segment-wise comparison, consistent with the client-side router the
//!   build registered these patterns with
//! - Trailing slashes are insignificant on both sides
//! - No regex; a single pass over the segments
//! - No pattern validation: a malformed pattern simply never matches

/// Returns true if `path` structurally matches `pattern`.
///
/// Pattern segments:
/// - a literal segment matches itself exactly (case-sensitive)
/// - `:name` matches exactly one segment
/// - `*` or `*name` matches the remainder of the path, including nothing,
///   and is only honored as the final segment
pub fn pattern_matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = segments(pattern);
    let mut path_segments = segments(path);

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (Some(pat), rest) => {
                if pat.starts_with('*') {
                    // Splat swallows the rest, but only in final position.
                    return pattern_segments.next().is_none();
                }
                match rest {
                    Some(seg) => {
                        if pat.starts_with(':') {
                            continue;
                        }
                        if pat != seg {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            (None, Some(_)) => return false,
            (None, None) => return true,
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_segments() {
        assert!(pattern_matches("/app", "/app"));
        assert!(pattern_matches("/app", "/app/"));
        assert!(!pattern_matches("/app", "/other"));
        assert!(!pattern_matches("/app", "/app/deeper"));
    }

    #[test]
    fn test_named_parameter() {
        assert!(pattern_matches("/users/:id", "/users/42"));
        assert!(pattern_matches("/users/:id/posts", "/users/42/posts"));
        assert!(!pattern_matches("/users/:id", "/users"));
        assert!(!pattern_matches("/users/:id", "/users/42/posts"));
    }

    #[test]
    fn test_splat() {
        assert!(pattern_matches("/app/*", "/app/settings"));
        assert!(pattern_matches("/app/*", "/app/a/b/c"));
        assert!(pattern_matches("/app/*", "/app"));
        assert!(pattern_matches("/app/*splat", "/app/settings"));
        assert!(!pattern_matches("/app/*", "/other/settings"));
    }

    #[test]
    fn test_root_patterns() {
        assert!(pattern_matches("/", "/"));
        assert!(!pattern_matches("/", "/app"));
        assert!(pattern_matches("/*", "/anything/at/all"));
        assert!(pattern_matches("/*", "/"));
    }

    #[test]
    fn test_non_final_splat_never_matches() {
        assert!(!pattern_matches("/app/*/tail", "/app/x/tail"));
    }

    #[test]
    fn test_case_sensitive_literals() {
        assert!(!pattern_matches("/App", "/app"));
    }
}
