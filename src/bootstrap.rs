//! Server bootstrap state machine.
//!
//! # Data Flow
//! ```text
//! INIT (load site config + match-path table, once)
//!     → RESOLVING_PORT (probe, consult policy on conflict)
//!     → TLS_PROVISIONING (only when HTTPS was requested)
//!     → LISTENING (bind plain or TLS transport)
//!     → RUNNING (startup notification, serve until signalled)
//!
//! ABORTED is reachable from every step: a declined port substitute exits
//! cleanly and silently, everything else surfaces a diagnostic.
//! ```
//!
//! # Design Decisions
//! - The effective port is final before the listener starts; the banner
//!   reflects the bound port, never the requested one
//! - TLS never downgrades: requested HTTPS without material is an error
//! - The banner is the only human-formatted output this crate prints

use std::io;
use std::net::SocketAddr;

use axum_server::{tls_rustls::RustlsConfig, Handle};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{loader::load_site_config, ServerConfig};
use crate::http::HttpServer;
use crate::lifecycle::{shutdown_signal, LifecycleNotifier, LogNotifier};
use crate::net::addr::{effective_hostname, prepare_urls, PreparedUrls};
use crate::net::port::{resolve_port, InteractivePrompt, PortPolicy, PortResolution};
use crate::net::tls::{PemFileProvisioner, TlsError, TlsProvisioner};
use crate::routing::MatchPathTable;

/// How a bootstrap run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The server ran and has now shut down.
    Served,
    /// The operator declined the substitute port; nothing was bound and
    /// nothing was printed.
    Declined,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Tls(#[from] TlsError),

    #[error("port resolution failed: {0}")]
    Port(#[source] io::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Drives startup: port conflict resolution, optional TLS provisioning,
/// binding, and the startup notification.
pub struct ServerBootstrap<P, T, N> {
    config: ServerConfig,
    port_policy: P,
    provisioner: T,
    notifier: N,
}

impl ServerBootstrap<InteractivePrompt, PemFileProvisioner, LogNotifier> {
    /// Bootstrap with the interactive port prompt, PEM-file certificate
    /// material, and log-only lifecycle hooks.
    pub fn with_defaults(config: ServerConfig) -> Self {
        let provisioner = PemFileProvisioner::new(
            config.cert_file.clone(),
            config.key_file.clone(),
            config.ca_file.clone(),
        );
        Self {
            config,
            port_policy: InteractivePrompt,
            provisioner,
            notifier: LogNotifier,
        }
    }
}

impl<P, T, N> ServerBootstrap<P, T, N>
where
    P: PortPolicy,
    T: TlsProvisioner,
    N: LifecycleNotifier,
{
    /// Bootstrap with injected collaborators.
    pub fn new(config: ServerConfig, port_policy: P, provisioner: T, notifier: N) -> Self {
        Self {
            config,
            port_policy,
            provisioner,
            notifier,
        }
    }

    /// Run the state machine to completion.
    pub async fn run(self) -> Result<BootstrapOutcome, BootstrapError> {
        // INIT: read build artifacts exactly once per process start.
        let site = load_site_config(&self.config.directory);
        let table = MatchPathTable::load(&self.config.directory);

        // RESOLVING_PORT
        let port = match resolve_port(&self.config.host, self.config.port, &self.port_policy)
            .await
            .map_err(BootstrapError::Port)?
        {
            PortResolution::Port(port) => port,
            PortResolution::Declined => return Ok(BootstrapOutcome::Declined),
        };

        // TLS_PROVISIONING
        let tls = if self.config.https {
            Some(self.provision_tls().await?)
        } else {
            None
        };

        let server = HttpServer::new(&self.config, &site, table);
        let scheme = if self.config.https { "https" } else { "http" };

        // LISTENING → RUNNING
        match tls {
            None => {
                let listener = TcpListener::bind((self.config.host.as_str(), port)).await?;
                let bound = listener.local_addr()?;

                self.notifier.on_start();
                self.announce(scheme, bound.port(), &site.name);

                server.serve(listener, shutdown_signal()).await?;
            }
            Some(tls) => {
                let addr = lookup(&self.config.host, port).await?;
                let handle = Handle::new();

                let signal_handle = handle.clone();
                tokio::spawn(async move {
                    shutdown_signal().await;
                    signal_handle.graceful_shutdown(None);
                });

                let serving = tokio::spawn(server.serve_tls(addr, tls, handle.clone()));

                if let Some(bound) = handle.listening().await {
                    self.notifier.on_start();
                    self.announce(scheme, bound.port(), &site.name);
                }

                serving
                    .await
                    .map_err(|err| BootstrapError::Io(io::Error::other(err)))??;
            }
        }

        self.notifier.on_stop();
        Ok(BootstrapOutcome::Served)
    }

    async fn provision_tls(&self) -> Result<RustlsConfig, BootstrapError> {
        if self.config.cert_file.is_some() != self.config.key_file.is_some() {
            return Err(BootstrapError::Config(
                "for a custom certificate, --cert-file and --key-file must be \
                 supplied together"
                    .to_string(),
            ));
        }

        let host = effective_hostname(&self.config.host);
        let material = self.provisioner.provision(host)?.ok_or_else(|| {
            BootstrapError::Config(format!(
                "no certificate material available for {host}; supply \
                 --cert-file and --key-file"
            ))
        })?;

        RustlsConfig::from_pem(material.cert_pem, material.key_pem)
            .await
            .map_err(BootstrapError::Io)
    }

    /// Startup notification: the human-readable "reachable at" banner.
    fn announce(&self, scheme: &str, port: u16, site_name: &str) {
        let PreparedUrls { local_url, lan_url } = prepare_urls(scheme, &self.config.host, port);

        println!();
        println!("You can now view {site_name} in the browser.");
        println!();
        println!("  Local:            {local_url}");
        if let Some(lan_url) = &lan_url {
            println!("  On Your Network:  {lan_url}");
        }
        println!();

        if self.config.open {
            if let Err(err) = open::that(&local_url) {
                tracing::warn!(
                    url = %local_url,
                    error = %err,
                    "Could not open a browser window"
                );
            }
        }
    }
}

async fn lookup(host: &str, port: u16) -> io::Result<SocketAddr> {
    tokio::net::lookup_host((host, port))
        .await?
        .next()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("could not resolve host {host}"),
            )
        })
}
