//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware, fallback handler)
//!     → accept.rs (does the client accept an HTML answer?)
//!     → routing layer decides (static / fallback / 404 / pass-through)
//!     → file streamed with conditional-request support, compressed per
//!       Accept-Encoding, CORS headers on every response
//! ```

pub mod accept;
pub mod server;

pub use server::HttpServer;
