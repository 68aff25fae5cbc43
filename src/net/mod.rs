//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (strictly before any listener is bound):
//!     port.rs (probe requested port, consult conflict policy)
//!     → tls.rs (optional certificate provisioning, keyed by hostname)
//!     → addr.rs (effective hostname, LAN address, display URLs)
//!     → Hand off to bootstrap for binding
//! ```
//!
//! # Design Decisions
//! - Port conflicts are a policy decision, injected so tests and
//!   non-interactive environments stay deterministic
//! - A declined substitute port is a clean abort, not an error
//! - TLS material comes from a provisioner collaborator; the core never
//!   falls back to plain HTTP when provisioning fails

pub mod addr;
pub mod port;
pub mod tls;

pub use addr::PreparedUrls;
pub use port::{PortPolicy, PortResolution};
pub use tls::{TlsMaterial, TlsProvisioner};
