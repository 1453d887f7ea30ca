//! Server configuration.
//!
//! Resolved once at process startup from CLI flags and environment, then passed into
//! [`crate::serve`]. Request handling never reads the environment.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use tonic::transport::{Certificate, Identity, ServerTlsConfig};

use crate::{ServerError, ServerResult};

/// Server certificate, PEM encoded.
pub const TLS_CERT_FILE: &str = "tls.crt";
/// Server private key, PEM encoded.
pub const TLS_KEY_FILE: &str = "tls.key";
/// CA that signs the pipeline's client certificates.
pub const CA_CERT_FILE: &str = "ca.crt";

/// Default listen address.
pub const DEFAULT_ADDRESS: &str = "0.0.0.0:9443";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TlsMode {
    /// Plaintext. Only for local development.
    Insecure,
    /// Mutual TLS using the certificates in `certs_dir`.
    Mutual { certs_dir: PathBuf },
}

/// gRPC server configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    address: SocketAddr,
    tls: TlsMode,
    reflection: bool,
}

impl ServerConfig {
    /// Create a new `ServerConfig`.
    ///
    /// `insecure` takes precedence over `tls_certs_dir`. Without `insecure` a certificates
    /// directory is required.
    pub fn new(
        address: SocketAddr,
        insecure: bool,
        tls_certs_dir: Option<PathBuf>,
        reflection: bool,
    ) -> ServerResult<Self> {
        let tls = match (insecure, tls_certs_dir) {
            (true, _) => TlsMode::Insecure,
            (false, Some(certs_dir)) => TlsMode::Mutual { certs_dir },
            (false, None) => return Err(ServerError::MissingCertificatesDir),
        };

        Ok(Self {
            address,
            tls,
            reflection,
        })
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn tls(&self) -> &TlsMode {
        &self.tls
    }

    pub fn reflection(&self) -> bool {
        self.reflection
    }
}

/// Builds a mutual TLS configuration from `tls.crt`, `tls.key` and `ca.crt` in `certs_dir`.
///
/// Clients must present a certificate signed by `ca.crt`.
pub fn load_tls_config(certs_dir: &Path) -> ServerResult<ServerTlsConfig> {
    let read = |name: &str| {
        let path = certs_dir.join(name);
        std::fs::read(&path).map_err(|source| ServerError::CertificateRead { path, source })
    };

    let cert = read(TLS_CERT_FILE)?;
    let key = read(TLS_KEY_FILE)?;
    let ca = read(CA_CERT_FILE)?;

    Ok(ServerTlsConfig::new()
        .identity(Identity::from_pem(cert, key))
        .client_ca_root(Certificate::from_pem(ca)))
}
