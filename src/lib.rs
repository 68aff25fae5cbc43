//! Static site server with client-side route emulation.
//!
//! Serves a pre-built site directory over HTTP/HTTPS. Requests resolve to
//! an on-disk file when one exists; otherwise, client-only route patterns
//! registered at build time ("match paths") map the URL to a page's
//! `index.html`, and anything left falls through to the site's 404 page.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                  SITESERVE                   │
//!                       │                                              │
//!   Client Request      │  ┌─────────┐   ┌──────────┐   ┌──────────┐  │
//!   ────────────────────┼─▶│  http   │──▶│ routing  │──▶│  static  │  │
//!                       │  │ server  │   │ resolver │   │   root   │  │
//!                       │  └─────────┘   └────┬─────┘   └──────────┘  │
//!                       │                     │                        │
//!                       │                     ▼                        │
//!                       │             ┌──────────────┐                 │
//!   Client Response     │             │  match-path  │                 │
//!   ◀───────────────────┼─────────────│    table     │                 │
//!                       │             └──────────────┘                 │
//!                       │                                              │
//!                       │  ┌────────────────────────────────────────┐  │
//!                       │  │          Startup (bootstrap)           │  │
//!                       │  │  ┌──────┐ ┌─────┐ ┌──────┐ ┌────────┐  │  │
//!                       │  │  │config│ │port │ │ tls  │ │lifecycle│ │  │
//!                       │  │  └──────┘ └─────┘ └──────┘ └────────┘  │  │
//!                       │  └────────────────────────────────────────┘  │
//!                       └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod bootstrap;
pub mod config;
pub mod http;
pub mod net;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use bootstrap::{BootstrapError, BootstrapOutcome, ServerBootstrap};
pub use config::{ServerConfig, SiteConfig};
pub use http::HttpServer;
pub use routing::{MatchPathTable, RouteDecision, RouteResolver};
