//! Match-path table loading.
//!
//! # Responsibilities
//! - Read the match-path descriptor emitted by the build
//! - Preserve entry order (the build writes most-specific patterns first)
//! - Degrade to an empty table when the descriptor is missing or corrupt

use std::path::Path;

use serde::Deserialize;

use crate::routing::matcher::pattern_matches;

/// Descriptor location relative to the site directory.
pub const DESCRIPTOR_PATH: &str = ".cache/match-paths.json";

/// A client-side route registered at build time.
///
/// `match_path` is the URL pattern; `path` is the page path under the static
/// root whose `index.html` is served when the pattern matches.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchPathEntry {
    pub path: String,
    pub match_path: String,
}

/// Ordered, immutable set of match-path entries for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct MatchPathTable {
    entries: Vec<MatchPathEntry>,
}

impl MatchPathTable {
    /// Load the table from the site's build cache.
    ///
    /// A missing or unreadable descriptor is not an error: routing degrades
    /// to static-file-only plus the 404 page, and a warning points at a
    /// rebuild as the fix.
    pub fn load(site_directory: &Path) -> Self {
        let descriptor = site_directory.join(DESCRIPTOR_PATH);

        let raw = match std::fs::read_to_string(&descriptor) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(
                    descriptor = %descriptor.display(),
                    error = %err,
                    "Could not read match-path descriptor; client-only routes \
                     will 404. Rebuild the site to regenerate it."
                );
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<MatchPathEntry>>(&raw) {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "Match-path table loaded");
                Self { entries }
            }
            Err(err) => {
                tracing::warn!(
                    descriptor = %descriptor.display(),
                    error = %err,
                    "Match-path descriptor is not valid JSON; client-only \
                     routes will 404. Rebuild the site to regenerate it."
                );
                Self::default()
            }
        }
    }

    /// Build a table directly from entries, preserving their order.
    pub fn from_entries(entries: Vec<MatchPathEntry>) -> Self {
        Self { entries }
    }

    /// Entries whose pattern structurally matches `path`, in load order.
    pub fn matching<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a MatchPathEntry> {
        self.entries
            .iter()
            .filter(move |entry| pattern_matches(&entry.match_path, path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
