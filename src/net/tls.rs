//! TLS certificate provisioning.
//!
//! # Responsibilities
//! - Define the provisioner boundary: hostname in, PEM material out
//! - Load and validate operator-supplied certificate/key files
//!
//! # Design Decisions
//! - Provisioning is a collaborator keyed by the effective hostname; the
//!   bootstrap decides what to do when it yields nothing
//! - Supplied PEM files are validated with rustls-pemfile before use so a
//!   bad file fails at startup, not at the first handshake
//! - An extra CA file is appended to the served chain

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TlsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} contains no usable {expected}")]
    Invalid { path: PathBuf, expected: &'static str },
}

/// PEM-encoded certificate chain and private key.
#[derive(Debug, Clone)]
pub struct TlsMaterial {
    pub cert_pem: Vec<u8>,
    pub key_pem: Vec<u8>,
}

/// Supplies certificate material for the given hostname.
pub trait TlsProvisioner: Send + Sync {
    /// Returns the material to serve with, or None when the provisioner has
    /// nothing to offer for this host.
    fn provision(&self, host: &str) -> Result<Option<TlsMaterial>, TlsError>;
}

/// Provisioner backed by operator-supplied PEM files.
///
/// With no files configured it yields nothing; acquiring or generating a
/// certificate for the host is a different provisioner's job.
#[derive(Debug, Default)]
pub struct PemFileProvisioner {
    cert_file: Option<PathBuf>,
    key_file: Option<PathBuf>,
    ca_file: Option<PathBuf>,
}

impl PemFileProvisioner {
    pub fn new(
        cert_file: Option<PathBuf>,
        key_file: Option<PathBuf>,
        ca_file: Option<PathBuf>,
    ) -> Self {
        Self {
            cert_file,
            key_file,
            ca_file,
        }
    }
}

impl TlsProvisioner for PemFileProvisioner {
    fn provision(&self, host: &str) -> Result<Option<TlsMaterial>, TlsError> {
        let (Some(cert_file), Some(key_file)) = (&self.cert_file, &self.key_file) else {
            return Ok(None);
        };

        tracing::debug!(
            host,
            cert = %cert_file.display(),
            key = %key_file.display(),
            "Using custom certificate material"
        );

        let mut cert_pem = read_pem(cert_file)?;
        validate_certs(&cert_pem, cert_file)?;

        let key_pem = read_pem(key_file)?;
        if rustls_pemfile::private_key(&mut key_pem.as_slice())
            .ok()
            .flatten()
            .is_none()
        {
            return Err(TlsError::Invalid {
                path: key_file.clone(),
                expected: "private key",
            });
        }

        if let Some(ca_file) = &self.ca_file {
            let ca_pem = read_pem(ca_file)?;
            validate_certs(&ca_pem, ca_file)?;
            cert_pem.extend_from_slice(&ca_pem);
        }

        Ok(Some(TlsMaterial { cert_pem, key_pem }))
    }
}

fn read_pem(path: &Path) -> Result<Vec<u8>, TlsError> {
    std::fs::read(path).map_err(|source| TlsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_certs(pem: &[u8], path: &Path) -> Result<(), TlsError> {
    let certs: Vec<_> = rustls_pemfile::certs(&mut &pem[..])
        .collect::<Result<_, _>>()
        .map_err(|source| TlsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if certs.is_empty() {
        return Err(TlsError::Invalid {
            path: path.to_path_buf(),
            expected: "certificate",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_files_yields_no_material() {
        let provisioner = PemFileProvisioner::default();
        assert!(provisioner.provision("localhost").unwrap().is_none());
    }

    #[test]
    fn test_missing_cert_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let provisioner = PemFileProvisioner::new(
            Some(dir.path().join("missing.crt")),
            Some(dir.path().join("missing.key")),
            None,
        );
        assert!(matches!(
            provisioner.provision("localhost"),
            Err(TlsError::Read { .. })
        ));
    }

    #[test]
    fn test_garbage_pem_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("site.crt");
        let key = dir.path().join("site.key");
        std::fs::write(&cert, "not a certificate").unwrap();
        std::fs::write(&key, "not a key").unwrap();

        let provisioner = PemFileProvisioner::new(Some(cert), Some(key), None);
        assert!(matches!(
            provisioner.provision("localhost"),
            Err(TlsError::Invalid { .. })
        ));
    }
}
