//! Start/stop lifecycle hooks.

/// Collaborator notified when the serve session starts and ends.
///
/// Implementations own the transport (telemetry, metrics, nothing at all);
/// the server only guarantees `on_start` fires after a successful bind and
/// `on_stop` fires best-effort on termination.
pub trait LifecycleNotifier: Send + Sync {
    fn on_start(&self) {}
    fn on_stop(&self) {}
}

/// Default notifier: structured log lines only.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl LifecycleNotifier for LogNotifier {
    fn on_start(&self) {
        tracing::info!("Serve session started");
    }

    fn on_stop(&self) {
        tracing::info!("Serve session ended");
    }
}
