use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("a TLS certificates directory is required unless running insecure")]
    MissingCertificatesDir,
    #[error("failed to read {path}: {source}", path = path.display())]
    CertificateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to configure TLS: {0}")]
    Tls(#[source] tonic::transport::Error),
    #[error("failed to build reflection service: {0}")]
    Reflection(#[from] tonic_reflection::server::Error),
    #[error("gRPC transport error: {0}")]
    Transport(#[source] tonic::transport::Error),
}

pub type ServerResult<T> = std::result::Result<T, ServerError>;
