//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path (+ Accept header)
//!     → resolver.rs (static file lookup under the static root)
//!     → table.rs (ordered match-path entries from the build descriptor)
//!     → matcher.rs (path-template comparison per entry)
//!     → Return: RouteDecision (static / fallback / 404 page / pass-through)
//!
//! Table loading (at startup):
//!     <siteDirectory>/.cache/match-paths.json
//!     → Deserialize as ordered array
//!     → Freeze as immutable MatchPathTable
//! ```
//!
//! # Design Decisions
//! - Table loaded once at startup, immutable at runtime
//! - Linear scan in load order, first structural match wins
//! - Load order is the tie-break contract (the build emits most-specific
//!   patterns first); the server never re-sorts entries
//! - Decisions are a pure function of (path, table, on-disk existence)

pub mod matcher;
pub mod resolver;
pub mod table;

pub use resolver::{RouteDecision, RouteResolver};
pub use table::{MatchPathEntry, MatchPathTable};
