use std::future::Future;

use function_proto::pb::function_runner_service_server::FunctionRunnerServiceServer;
use function_proto::FILE_DESCRIPTOR_SET;
use namer_core::CompositionFunction;
use tonic::transport::Server;
use tonic_reflection::server::Builder;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::{load_tls_config, ServerConfig, TlsMode};
use crate::{FunctionService, ServerError, ServerResult};

/// Serves `service` until `shutdown` resolves.
pub async fn serve<F, S>(
    config: &ServerConfig,
    service: FunctionService<F>,
    shutdown: S,
) -> ServerResult<()>
where
    F: CompositionFunction,
    S: Future<Output = ()> + Send,
{
    let mut server_builder = Server::builder();

    match config.tls() {
        TlsMode::Mutual { certs_dir } => {
            server_builder = server_builder
                .tls_config(load_tls_config(certs_dir)?)
                .map_err(ServerError::Tls)?;
            tracing::info!("mutual TLS enabled (certs: {})", certs_dir.display());
        }
        TlsMode::Insecure => {
            tracing::warn!("serving without TLS");
        }
    }

    let layer = ServiceBuilder::new().layer(TraceLayer::new_for_grpc());
    let mut router = server_builder
        .layer(layer)
        .add_service(FunctionRunnerServiceServer::new(service));

    if config.reflection() {
        let reflection_service = Builder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .build_v1()?;
        router = router.add_service(reflection_service);
        tracing::info!("gRPC server reflection enabled");
    } else {
        tracing::info!("gRPC server reflection disabled");
    }

    tracing::info!("-- Serving function on {}", config.address());
    router
        .serve_with_shutdown(config.address(), shutdown)
        .await
        .map_err(ServerError::Transport)
}
