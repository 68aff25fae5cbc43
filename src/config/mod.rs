//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! program arguments (resolved by the CLI collaborator)
//!     → ServerConfig (immutable once bootstrap begins)
//!
//! <siteDirectory>/.cache/site-config.json
//!     → loader.rs (parse & deserialize)
//!     → SiteConfig (display name, path prefix)
//! ```
//!
//! # Design Decisions
//! - The core never parses CLI flags; it consumes resolved values
//! - Site build config is read once; absence falls back to defaults
//! - The path prefix only applies when `prefix_paths` is set

pub mod loader;
pub mod schema;

pub use schema::{ServerConfig, SiteConfig};
