//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Resolved startup parameters for the server.
///
/// Built once from program input; immutable after bootstrap begins.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Site directory containing `public/` and `.cache/`.
    pub directory: PathBuf,

    /// Host to bind (name or address; wildcards allowed).
    pub host: String,

    /// Requested port. The effective port may differ after conflict
    /// resolution and is finalized before the listener starts.
    pub port: u16,

    /// Serve over HTTPS instead of HTTP.
    pub https: bool,

    /// Mount the site under the build config's path prefix.
    pub prefix_paths: bool,

    /// Custom certificate file (PEM). Must be paired with `key_file`.
    pub cert_file: Option<PathBuf>,

    /// Custom private key file (PEM). Must be paired with `cert_file`.
    pub key_file: Option<PathBuf>,

    /// Custom certificate authority file (PEM).
    pub ca_file: Option<PathBuf>,

    /// Open the local URL in a browser once the server is listening.
    pub open: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            host: "localhost".to_string(),
            port: 9000,
            https: false,
            prefix_paths: false,
            cert_file: None,
            key_file: None,
            ca_file: None,
            open: false,
        }
    }
}

impl ServerConfig {
    /// The static root: the built site assets under the site directory.
    pub fn static_root(&self) -> PathBuf {
        self.directory.join("public")
    }
}

/// Build-time site configuration consumed at serve time.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Display name used in the startup banner.
    pub name: String,

    /// Fixed URL segment the site was built to be mounted under.
    pub path_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "site".to_string(),
            path_prefix: String::new(),
        }
    }
}
