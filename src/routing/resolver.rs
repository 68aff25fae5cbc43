//! Request path resolution.
//!
//! # Responsibilities
//! - Normalize the raw request path (percent-decoding, dot segments)
//! - Look for a literal file under the static root
//! - Scan the match-path table for a client-route fallback
//! - Fall back to the site's 404 page, or pass the request through
//!
//! # Design Decisions
//! - Pure decision function: no state accumulates across requests
//! - Fallback and the 404 page are only offered to clients that accept HTML
//! - A matching entry whose index.html is missing is skipped, not an error;
//!   the scan continues and finally lands on the 404 page
//! - Traversal outside the static root resolves to pass-through

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

use crate::routing::table::MatchPathTable;

/// Name of the not-found page at the top of the static root.
pub const NOT_FOUND_PAGE: &str = "404.html";

/// Outcome of resolving one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// An on-disk file under the static root.
    Static(PathBuf),
    /// The index.html of the first matching client-side route.
    Fallback(PathBuf),
    /// The site's 404 page, to be served with status 404.
    NotFound(PathBuf),
    /// Nothing this layer can serve; delegate to the next handler.
    PassThrough,
}

/// Stateless resolver shared by all request handlers.
#[derive(Debug)]
pub struct RouteResolver {
    static_root: PathBuf,
    table: MatchPathTable,
}

impl RouteResolver {
    pub fn new(static_root: PathBuf, table: MatchPathTable) -> Self {
        Self { static_root, table }
    }

    pub fn static_root(&self) -> &Path {
        &self.static_root
    }

    /// Decide how to answer a request for `request_path`.
    ///
    /// The decision depends only on the path, the immutable match-path
    /// table, and what exists on disk at this instant.
    pub fn resolve(&self, request_path: &str, accepts_html: bool) -> RouteDecision {
        let Some(relative) = normalize_path(request_path) else {
            return RouteDecision::PassThrough;
        };

        if let Some(file) = self.static_file(&relative) {
            return RouteDecision::Static(file);
        }

        if !accepts_html {
            return RouteDecision::PassThrough;
        }

        let url_path = format!("/{relative}");
        for entry in self.table.matching(&url_path) {
            let index = self
                .static_root
                .join(entry.path.trim_matches('/'))
                .join("index.html");
            if index.is_file() {
                return RouteDecision::Fallback(index);
            }
            tracing::warn!(
                pattern = %entry.match_path,
                page = %entry.path,
                "Match-path target index.html is missing; trying next entry"
            );
        }

        let not_found = self.static_root.join(NOT_FOUND_PAGE);
        if not_found.is_file() {
            RouteDecision::NotFound(not_found)
        } else {
            RouteDecision::PassThrough
        }
    }

    /// Literal file lookup: the path itself, or its directory index.
    fn static_file(&self, relative: &str) -> Option<PathBuf> {
        let candidate = self.static_root.join(relative);
        if candidate.is_file() {
            return Some(candidate);
        }
        if candidate.is_dir() {
            let index = candidate.join("index.html");
            if index.is_file() {
                return Some(index);
            }
        }
        None
    }
}

/// Percent-decode and normalize a request path to a root-relative path.
///
/// Returns None when the path is not valid UTF-8 after decoding or when dot
/// segments would escape the static root.
fn normalize_path(raw: &str) -> Option<String> {
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;

    let mut normalized: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                normalized.pop()?;
            }
            segment => normalized.push(segment),
        }
    }
    Some(normalized.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::table::MatchPathEntry;
    use std::fs;

    fn site_with(files: &[&str]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("public");
        for file in files {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, format!("contents of {file}")).unwrap();
        }
        (dir, root)
    }

    fn entry(path: &str, match_path: &str) -> MatchPathEntry {
        MatchPathEntry {
            path: path.into(),
            match_path: match_path.into(),
        }
    }

    #[test]
    fn test_existing_file_is_static() {
        let (_dir, root) = site_with(&["styles.css"]);
        let resolver = RouteResolver::new(root.clone(), MatchPathTable::default());

        assert_eq!(
            resolver.resolve("/styles.css", false),
            RouteDecision::Static(root.join("styles.css"))
        );
    }

    #[test]
    fn test_directory_serves_its_index() {
        let (_dir, root) = site_with(&["about/index.html"]);
        let resolver = RouteResolver::new(root.clone(), MatchPathTable::default());

        assert_eq!(
            resolver.resolve("/about/", true),
            RouteDecision::Static(root.join("about/index.html"))
        );
        assert_eq!(
            resolver.resolve("/about", true),
            RouteDecision::Static(root.join("about/index.html"))
        );
    }

    #[test]
    fn test_first_matching_entry_wins() {
        let (_dir, root) = site_with(&["app/index.html", "app/profile/index.html"]);
        let table = MatchPathTable::from_entries(vec![
            entry("/app/profile/", "/app/profile/*"),
            entry("/app/", "/app/*"),
        ]);
        let resolver = RouteResolver::new(root.clone(), table);

        assert_eq!(
            resolver.resolve("/app/profile/me", true),
            RouteDecision::Fallback(root.join("app/profile/index.html"))
        );
        assert_eq!(
            resolver.resolve("/app/settings", true),
            RouteDecision::Fallback(root.join("app/index.html"))
        );
    }

    #[test]
    fn test_missing_fallback_target_skips_to_next_entry() {
        let (_dir, root) = site_with(&["app/index.html", "404.html"]);
        let table = MatchPathTable::from_entries(vec![
            entry("/gone/", "/app/*"),
            entry("/app/", "/app/*"),
        ]);
        let resolver = RouteResolver::new(root.clone(), table);

        assert_eq!(
            resolver.resolve("/app/settings", true),
            RouteDecision::Fallback(root.join("app/index.html"))
        );
    }

    #[test]
    fn test_exhausted_entries_land_on_not_found_page() {
        let (_dir, root) = site_with(&["404.html"]);
        let table = MatchPathTable::from_entries(vec![entry("/gone/", "/app/*")]);
        let resolver = RouteResolver::new(root.clone(), table);

        assert_eq!(
            resolver.resolve("/app/settings", true),
            RouteDecision::NotFound(root.join("404.html"))
        );
    }

    #[test]
    fn test_non_html_client_passes_through() {
        let (_dir, root) = site_with(&["app/index.html", "404.html"]);
        let table = MatchPathTable::from_entries(vec![entry("/app/", "/app/*")]);
        let resolver = RouteResolver::new(root, table);

        assert_eq!(
            resolver.resolve("/app/settings", false),
            RouteDecision::PassThrough
        );
    }

    #[test]
    fn test_missing_not_found_page_passes_through() {
        let (_dir, root) = site_with(&[]);
        let resolver = RouteResolver::new(root, MatchPathTable::default());

        assert_eq!(resolver.resolve("/unknown", true), RouteDecision::PassThrough);
    }

    #[test]
    fn test_traversal_escaping_root_passes_through() {
        let (_dir, root) = site_with(&["styles.css"]);
        let resolver = RouteResolver::new(root, MatchPathTable::default());

        assert_eq!(
            resolver.resolve("/../styles.css", true),
            RouteDecision::PassThrough
        );
    }

    #[test]
    fn test_percent_decoded_lookup() {
        let (_dir, root) = site_with(&["hello world.txt"]);
        let resolver = RouteResolver::new(root.clone(), MatchPathTable::default());

        assert_eq!(
            resolver.resolve("/hello%20world.txt", false),
            RouteDecision::Static(root.join("hello world.txt"))
        );
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/a/b/../c"), Some("a/c".into()));
        assert_eq!(normalize_path("/a/./b/"), Some("a/b".into()));
        assert_eq!(normalize_path("/"), Some(String::new()));
        assert_eq!(normalize_path("/../etc/passwd"), None);
    }
}
