//! Shared fixtures for integration tests.

use std::fs;
use std::path::Path;

use axum::Router;
use siteserve::{HttpServer, MatchPathTable, ServerConfig, SiteConfig};
use tempfile::TempDir;

/// A throwaway built-site directory: `public/` plus an optional
/// `.cache/match-paths.json` descriptor.
pub struct SiteFixture {
    dir: TempDir,
}

#[allow(dead_code)]
impl SiteFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp site");
        fs::create_dir_all(dir.path().join("public")).expect("create public/");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file under public/, creating parent directories.
    pub fn write_public(&self, relative: &str, contents: &str) {
        let path = self.dir.path().join("public").join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// Write the match-path descriptor verbatim.
    pub fn write_match_paths(&self, json: &str) {
        let cache = self.dir.path().join(".cache");
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join("match-paths.json"), json).unwrap();
    }

    /// Write the site build config verbatim.
    pub fn write_site_config(&self, json: &str) {
        let cache = self.dir.path().join(".cache");
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join("site-config.json"), json).unwrap();
    }

    pub fn config(&self) -> ServerConfig {
        ServerConfig {
            directory: self.dir.path().to_path_buf(),
            ..ServerConfig::default()
        }
    }

    /// Assemble the request-handling router the way bootstrap would.
    pub fn router(&self) -> Router {
        self.router_with(self.config())
    }

    pub fn router_with(&self, config: ServerConfig) -> Router {
        let site = siteserve::config::loader::load_site_config(self.path());
        let table = MatchPathTable::load(self.path());
        HttpServer::new(&config, &site, table).into_router()
    }

    pub fn site_config(&self) -> SiteConfig {
        siteserve::config::loader::load_site_config(self.path())
    }
}
