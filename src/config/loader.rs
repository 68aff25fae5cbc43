//! Site build-config loading from disk.

use std::path::Path;

use crate::config::schema::SiteConfig;

/// Build config location relative to the site directory.
pub const SITE_CONFIG_PATH: &str = ".cache/site-config.json";

/// Load the site's build configuration.
///
/// A missing file is normal for older builds and yields the defaults. A
/// present but unparsable file is worth a warning since a requested path
/// prefix would silently not apply.
pub fn load_site_config(site_directory: &Path) -> SiteConfig {
    let path = site_directory.join(SITE_CONFIG_PATH);

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(_) => return SiteConfig::default(),
    };

    match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                config = %path.display(),
                error = %err,
                "Site build config is not valid JSON; using defaults"
            );
            SiteConfig::default()
        }
    }
}
