//! Port probing and conflict resolution.
//!
//! # Responsibilities
//! - Detect whether the requested port is already bound
//! - Pick a free substitute port when it is
//! - Let an injected policy accept the substitute or decline
//!
//! # Design Decisions
//! - Probing binds and immediately drops a listener; only AddrInUse counts
//!   as a conflict, any other bind failure is fatal
//! - The policy runs at startup, before the serving phase, so blocking on
//!   stdin is acceptable for the interactive implementation

use std::io::{self, BufRead, Write};

use tokio::net::TcpListener;

/// Decision source for an occupied requested port.
pub trait PortPolicy: Send + Sync {
    /// Returns true to serve on `substitute` instead of `requested`.
    fn confirm(&self, requested: u16, substitute: u16) -> bool;
}

impl<F> PortPolicy for F
where
    F: Fn(u16, u16) -> bool + Send + Sync,
{
    fn confirm(&self, requested: u16, substitute: u16) -> bool {
        self(requested, substitute)
    }
}

/// Prompts the operator on stdin, defaulting to yes.
#[derive(Debug, Default)]
pub struct InteractivePrompt;

impl PortPolicy for InteractivePrompt {
    fn confirm(&self, requested: u16, substitute: u16) -> bool {
        print!(
            "Something is already running at port {requested}.\n\
             Would you like to run the site at port {substitute} instead? [Y/n] "
        );
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "" | "y" | "Y" | "yes" | "Yes")
    }
}

/// Result of resolving the listening port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortResolution {
    /// The port the listener should bind.
    Port(u16),
    /// The operator declined the substitute; abort cleanly.
    Declined,
}

/// Finalize the listening port before any listener starts.
pub async fn resolve_port(
    host: &str,
    requested: u16,
    policy: &dyn PortPolicy,
) -> io::Result<PortResolution> {
    if port_is_free(host, requested).await? {
        return Ok(PortResolution::Port(requested));
    }

    let substitute = pick_free_port(host).await?;
    tracing::debug!(requested, substitute, "Requested port is occupied");

    if policy.confirm(requested, substitute) {
        Ok(PortResolution::Port(substitute))
    } else {
        Ok(PortResolution::Declined)
    }
}

async fn port_is_free(host: &str, port: u16) -> io::Result<bool> {
    match TcpListener::bind((host, port)).await {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::AddrInUse => Ok(false),
        Err(err) => Err(err),
    }
}

/// Ask the OS for any free port on `host`.
async fn pick_free_port(host: &str) -> io::Result<u16> {
    let listener = TcpListener::bind((host, 0)).await?;
    Ok(listener.local_addr()?.port())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_free_port_is_kept() {
        let probe = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let port = probe.local_addr().unwrap().port();
        drop(probe);

        let policy = |_: u16, _: u16| -> bool { panic!("policy must not be consulted") };
        let resolved = resolve_port("127.0.0.1", port, &policy).await.unwrap();
        assert_eq!(resolved, PortResolution::Port(port));
    }

    #[tokio::test]
    async fn test_occupied_port_offers_substitute() {
        let occupier = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let occupied = occupier.local_addr().unwrap().port();

        let policy = |requested: u16, substitute: u16| {
            assert_eq!(requested, occupied);
            assert_ne!(substitute, occupied);
            true
        };
        match resolve_port("127.0.0.1", occupied, &policy).await.unwrap() {
            PortResolution::Port(port) => {
                assert_ne!(port, occupied);
                // The substitute must actually be bindable.
                TcpListener::bind(("127.0.0.1", port)).await.unwrap();
            }
            PortResolution::Declined => panic!("policy accepted the substitute"),
        }
    }

    #[tokio::test]
    async fn test_declined_substitute() {
        let occupier = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let occupied = occupier.local_addr().unwrap().port();

        let policy = |_: u16, _: u16| false;
        let resolved = resolve_port("127.0.0.1", occupied, &policy).await.unwrap();
        assert_eq!(resolved, PortResolution::Declined);
    }
}
