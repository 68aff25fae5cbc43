//! Observability subsystem.
//!
//! # Design Decisions
//! - tracing is the reporting surface: warnings never stop startup,
//!   errors do, and the startup banner is the only direct console output
//! - Log level is configurable via RUST_LOG

pub mod logging;
