//! Thin CLI entry point.
//!
//! Argument parsing lives here, outside the core: the bootstrap consumes
//! the resolved `ServerConfig` and never sees a flag.

use std::path::PathBuf;

use clap::Parser;

use siteserve::{observability, ServerBootstrap, ServerConfig};

#[derive(Parser)]
#[command(name = "siteserve")]
#[command(about = "Serve a built site directory, emulating client-only routes", long_about = None)]
struct Cli {
    /// Site directory containing public/ and .cache/
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Host to bind
    #[arg(short = 'H', long, default_value = "localhost")]
    host: String,

    /// Port to bind
    #[arg(short, long, default_value_t = 9000)]
    port: u16,

    /// Serve over HTTPS
    #[arg(long)]
    https: bool,

    /// Custom certificate file (PEM); requires --key-file
    #[arg(long, requires = "https")]
    cert_file: Option<PathBuf>,

    /// Custom private key file (PEM); requires --cert-file
    #[arg(long, requires = "https")]
    key_file: Option<PathBuf>,

    /// Custom certificate authority file (PEM)
    #[arg(long, requires = "https")]
    ca_file: Option<PathBuf>,

    /// Mount the site under the path prefix it was built with
    #[arg(long)]
    prefix_paths: bool,

    /// Open the site in the default browser once it is reachable
    #[arg(short, long)]
    open: bool,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            directory: self.directory,
            host: self.host,
            port: self.port,
            https: self.https,
            prefix_paths: self.prefix_paths,
            cert_file: self.cert_file,
            key_file: self.key_file,
            ca_file: self.ca_file,
            open: self.open,
        }
    }
}

#[tokio::main]
async fn main() {
    observability::logging::init();

    let config = Cli::parse().into_config();

    tracing::info!(
        directory = %config.directory.display(),
        host = %config.host,
        port = config.port,
        https = config.https,
        "Configuration loaded"
    );

    // A declined port substitute is a clean, silent exit by contract.
    if let Err(err) = ServerBootstrap::with_defaults(config).run().await {
        tracing::error!(error = %err, "Startup failed");
        std::process::exit(1);
    }
}
