//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     listener bound → notifier.on_start()
//!
//! Shutdown:
//!     termination signal → stop accepting → notifier.on_stop() (best effort)
//! ```
//!
//! # Design Decisions
//! - Start/stop hooks are a collaborator boundary; the transport behind
//!   them (telemetry or otherwise) lives outside this crate
//! - Shutdown is signal-driven; in-flight requests are not cancelled

pub mod notify;

pub use notify::{LifecycleNotifier, LogNotifier};

/// Resolves when the process receives a termination signal.
pub async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
